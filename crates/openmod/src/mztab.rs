//! Read the PSM section of mzTab files
//!
//! Only `PSH` (header) and `PSM` (data) lines are interpreted; metadata,
//! comments, and the protein/peptide/small molecule sections are skipped.

use crate::psm::Psm;
use fnv::FnvHashMap;
use std::io::Read;

pub const SEQUENCE: &str = "sequence";
pub const CHARGE: &str = "charge";
pub const EXP_MASS_TO_CHARGE: &str = "exp_mass_to_charge";
pub const CALC_MASS_TO_CHARGE: &str = "calc_mass_to_charge";
pub const DEFAULT_SCORE: &str = "search_engine_score[1]";

#[derive(Debug)]
pub enum MzTabError {
    /// A required column is absent from the PSM header, or PSM rows appear
    /// before any header
    MissingColumn(String),
    Malformed {
        line: u64,
        column: String,
        value: String,
    },
    Csv(csv::Error),
}

impl std::fmt::Display for MzTabError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingColumn(column) => write!(f, "missing PSM column `{}`", column),
            Self::Malformed {
                line,
                column,
                value,
            } => write!(
                f,
                "line {}: cannot parse `{}` value `{}`",
                line, column, value
            ),
            Self::Csv(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for MzTabError {}

impl From<csv::Error> for MzTabError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}

/// Positions of the required columns within a `PSM` line
struct Columns {
    sequence: usize,
    charge: usize,
    exp_mass_to_charge: usize,
    calc_mass_to_charge: usize,
    score: usize,
}

impl Columns {
    fn from_header(header: &csv::StringRecord, score_column: &str) -> Result<Self, MzTabError> {
        let index = header
            .iter()
            .enumerate()
            .map(|(ix, name)| (name.trim(), ix))
            .collect::<FnvHashMap<_, _>>();

        let find = |name: &str| {
            index
                .get(name)
                .copied()
                .ok_or_else(|| MzTabError::MissingColumn(name.into()))
        };

        Ok(Columns {
            sequence: find(SEQUENCE)?,
            charge: find(CHARGE)?,
            exp_mass_to_charge: find(EXP_MASS_TO_CHARGE)?,
            calc_mass_to_charge: find(CALC_MASS_TO_CHARGE)?,
            score: find(score_column)?,
        })
    }
}

pub struct MzTabReader {
    score_column: String,
}

impl Default for MzTabReader {
    fn default() -> Self {
        Self {
            score_column: DEFAULT_SCORE.into(),
        }
    }
}

impl MzTabReader {
    /// Column holding the PSM score. Higher values must indicate more
    /// confident matches
    pub fn set_score_column<S: Into<String>>(mut self, score_column: S) -> Self {
        self.score_column = score_column.into();
        self
    }

    pub fn parse<R: Read>(&self, r: R) -> Result<Vec<Psm>, MzTabError> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(r);

        let mut columns = None;
        let mut psms = Vec::new();

        for record in reader.records() {
            let record = record?;
            match record.get(0).map(str::trim) {
                Some("PSH") => {
                    columns = Some(Columns::from_header(&record, &self.score_column)?);
                }
                Some("PSM") => {
                    let cols = columns
                        .as_ref()
                        .ok_or_else(|| MzTabError::MissingColumn("PSH".into()))?;
                    psms.push(self.parse_row(&record, cols)?);
                }
                _ => {}
            }
        }

        Ok(psms)
    }

    fn parse_row(&self, record: &csv::StringRecord, cols: &Columns) -> Result<Psm, MzTabError> {
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        let value = field(record, cols.charge);
        let charge = match value.parse::<i32>() {
            Ok(charge) => charge,
            // Some writers emit charges as floats, e.g. `2.0`
            Err(_) => match value.parse::<f64>() {
                Ok(z) if z.fract() == 0.0 && z.abs() <= i32::MAX as f64 => z as i32,
                _ => return Err(malformed(line, CHARGE, value)),
            },
        };

        Ok(Psm::new(
            field(record, cols.sequence),
            charge,
            float(record, cols.exp_mass_to_charge, EXP_MASS_TO_CHARGE, line)?,
            float(record, cols.calc_mass_to_charge, CALC_MASS_TO_CHARGE, line)?,
            float(record, cols.score, &self.score_column, line)?,
        ))
    }
}

fn field(record: &csv::StringRecord, ix: usize) -> &str {
    record.get(ix).unwrap_or_default().trim()
}

fn malformed(line: u64, column: &str, value: &str) -> MzTabError {
    MzTabError::Malformed {
        line,
        column: column.into(),
        value: value.into(),
    }
}

fn float(
    record: &csv::StringRecord,
    ix: usize,
    column: &str,
    line: u64,
) -> Result<f64, MzTabError> {
    let value = field(record, ix);
    value
        .parse::<f64>()
        .map_err(|_| malformed(line, column, value))
}

#[cfg(test)]
mod test {
    use super::*;

    const MZTAB: &str = "MTD\tmzTab-version\t1.0.0
MTD\tmzTab-mode\tSummary
MTD\tpsm_search_engine_score[1]\t[MS, MS:1001143, search engine specific score for PSMs, ]
COM\tgenerated for testing

PSH\tsequence\tPSM_ID\taccession\tsearch_engine_score[1]\tcharge\texp_mass_to_charge\tcalc_mass_to_charge
PSM\tLQSRPAAPPAPGPGQLTLR\t1\tnull\t0.92\t2\t983.0530\t975.0555\t
PSM\tVLLVPGPEK\t2\tnull\t0.75\t3.0\t317.1950\t317.1950
";

    #[test]
    fn parse_psms() -> Result<(), MzTabError> {
        let psms = MzTabReader::default().parse(MZTAB.as_bytes())?;
        assert_eq!(psms.len(), 2);
        assert_eq!(psms[0].sequence, "LQSRPAAPPAPGPGQLTLR");
        assert_eq!(psms[0].charge, 2);
        assert_eq!(psms[0].score, 0.92);
        assert!((psms[0].mass_diff() - 15.995).abs() < 1e-6);
        assert_eq!(psms[1].charge, 3);
        assert_eq!(psms[1].mass_diff(), 0.0);
        Ok(())
    }

    #[test]
    fn custom_score_column() -> Result<(), MzTabError> {
        let data = MZTAB.replace("search_engine_score[1]\tcharge", "hyperscore\tcharge");
        let psms = MzTabReader::default()
            .set_score_column("hyperscore")
            .parse(data.as_bytes())?;
        assert_eq!(psms.len(), 2);

        assert!(matches!(
            MzTabReader::default().parse(data.as_bytes()),
            Err(MzTabError::MissingColumn(col)) if col == DEFAULT_SCORE
        ));
        Ok(())
    }

    #[test]
    fn missing_column() {
        let data = MZTAB.replace("\tcalc_mass_to_charge", "\tcalc_mz");
        assert!(matches!(
            MzTabReader::default().parse(data.as_bytes()),
            Err(MzTabError::MissingColumn(col)) if col == CALC_MASS_TO_CHARGE
        ));

        let data = "PSM\tPEPTIDE\t1\tnull\t0.5\t2\t500.0\t500.0\n";
        assert!(matches!(
            MzTabReader::default().parse(data.as_bytes()),
            Err(MzTabError::MissingColumn(_))
        ));
    }

    #[test]
    fn malformed_values() {
        let data = MZTAB.replace("\t983.0530\t", "\tnull\t");
        match MzTabReader::default().parse(data.as_bytes()) {
            Err(MzTabError::Malformed { column, value, .. }) => {
                assert_eq!(column, EXP_MASS_TO_CHARGE);
                assert_eq!(value, "null");
            }
            _ => panic!("expected malformed value"),
        }

        let data = MZTAB.replace("\t0.75\t", "\tnull\t");
        assert!(matches!(
            MzTabReader::default().parse(data.as_bytes()),
            Err(MzTabError::Malformed { column, .. }) if column == DEFAULT_SCORE
        ));

        let data = MZTAB.replace("\t3.0\t", "\t2.5\t");
        assert!(matches!(
            MzTabReader::default().parse(data.as_bytes()),
            Err(MzTabError::Malformed { .. })
        ));
    }

    #[test]
    fn no_psm_section() -> Result<(), MzTabError> {
        let data = "MTD\tmzTab-version\t1.0.0\n";
        assert!(MzTabReader::default().parse(data.as_bytes())?.is_empty());
        Ok(())
    }
}

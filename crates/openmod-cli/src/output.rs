use openmod_core::groups::GroupStats;

use crate::runner::Runner;

impl Runner {
    pub fn serialize_group(&self, group: &GroupStats) -> csv::ByteRecord {
        let mut record = csv::ByteRecord::new();
        record.push_field(ryu::Buffer::new().format(group.mass_diff_median).as_bytes());
        record.push_field(ryu::Buffer::new().format(group.mass_diff_mean).as_bytes());
        record.push_field(itoa::Buffer::new().format(group.num_matches).as_bytes());
        record.push_field(ryu::Buffer::new().format(group.seed_mass_diff).as_bytes());
        record
    }

    pub fn write_groups(&self, groups: &[GroupStats]) -> anyhow::Result<String> {
        let path = self.make_path("mass_groups.tsv");

        let mut wtr = csv::WriterBuilder::new()
            .delimiter(b'\t')
            .from_writer(vec![]);

        let headers = csv::ByteRecord::from(vec![
            "mass_diff_median",
            "mass_diff_mean",
            "num_psms",
            "seed_mass_diff",
        ]);

        wtr.write_byte_record(&headers)?;
        for group in groups {
            wtr.write_byte_record(&self.serialize_group(group))?;
        }

        wtr.flush()?;
        let bytes = wtr.into_inner()?;
        std::fs::write(&path, bytes)?;
        Ok(path.display().to_string())
    }
}

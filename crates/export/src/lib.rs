//! Export helpers for CSV and JSON ranking artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod ranking {
    use std::io::{self, Write};

    const HEADER: &str = "rank,r1,r2,r3,length1_m,length2_m,length3_m,mf1,mf2,mf3,dv1_m_s,dv2_m_s,dv3_m_s,dv_total_m_s,feasible";

    /// Write the standard ranking CSV header.
    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// CSV row emitted by the ranking exporter.
    #[derive(Debug, Clone, Copy)]
    pub struct Record<'a> {
        pub rank: usize,
        pub ratios: [f64; 3],
        pub lengths_m: [f64; 3],
        pub mass_fractions: &'a [f64],
        pub stage_delta_vs: &'a [f64],
        pub delta_v_total: f64,
        pub feasible: bool,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the standard header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            let mf = padded(self.mass_fractions);
            let dv = padded(self.stage_delta_vs);
            writeln!(
                writer,
                "{},{:.6},{:.6},{:.6},{:.4},{:.4},{:.4},{:.6},{:.6},{:.6},{:.3},{:.3},{:.3},{:.3},{}",
                self.rank,
                self.ratios[0],
                self.ratios[1],
                self.ratios[2],
                self.lengths_m[0],
                self.lengths_m[1],
                self.lengths_m[2],
                mf[0],
                mf[1],
                mf[2],
                dv[0],
                dv[1],
                dv[2],
                self.delta_v_total,
                if self.feasible { "true" } else { "false" },
            )
        }
    }

    fn padded(values: &[f64]) -> [f64; 3] {
        let mut out = [f64::NAN; 3];
        for (slot, value) in out.iter_mut().zip(values) {
            *slot = *value;
        }
        out
    }
}

pub mod json {
    use serde::Serialize;
    use serde_json::to_writer_pretty;
    use std::io::{self, Write};

    /// One ranked split in the JSON document.
    #[derive(Debug, Clone, Serialize)]
    pub struct RankedEntry {
        pub rank: usize,
        pub ratios: [f64; 3],
        pub lengths_m: [f64; 3],
        pub mass_fractions: Vec<f64>,
        pub stage_delta_vs: Vec<f64>,
        pub delta_v: f64,
        pub feasible: bool,
    }

    /// Search parameters echoed alongside the ranking.
    #[derive(Debug, Clone, Serialize)]
    pub struct RankingDocument {
        pub total_length_m: f64,
        pub diameter_m: f64,
        pub grid_points: usize,
        pub candidates_evaluated: usize,
        pub entries: Vec<RankedEntry>,
    }

    /// Write the ranking as pretty-printed JSON.
    pub fn write_ranking(writer: &mut dyn Write, document: &RankingDocument) -> io::Result<()> {
        to_writer_pretty(&mut *writer, document)?;
        writeln!(writer)
    }
}

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, StringBuilder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;

use ev_dashboard::data::model::{
    CITY, COUNTY, ELECTRIC_RANGE, MAKE, MODEL, MODEL_YEAR, POSTAL_CODE, VEHICLE_TYPE,
};

const COLUMNS: [&str; 8] = [
    MAKE,
    MODEL,
    MODEL_YEAR,
    VEHICLE_TYPE,
    CITY,
    COUNTY,
    POSTAL_CODE,
    ELECTRIC_RANGE,
];

/// (make, model, vehicle type, typical range)
const MODELS: [(&str, &str, &str, u64); 8] = [
    ("TESLA", "MODEL 3", "Battery Electric Vehicle (BEV)", 266),
    ("TESLA", "MODEL Y", "Battery Electric Vehicle (BEV)", 291),
    ("NISSAN", "LEAF", "Battery Electric Vehicle (BEV)", 150),
    ("CHEVROLET", "BOLT EV", "Battery Electric Vehicle (BEV)", 259),
    ("TOYOTA", "PRIUS PRIME", "Plug-in Hybrid Electric Vehicle (PHEV)", 25),
    ("KIA", "NIRO", "Plug-in Hybrid Electric Vehicle (PHEV)", 26),
    ("BMW", "X5", "Plug-in Hybrid Electric Vehicle (PHEV)", 30),
    ("FORD", "MUSTANG MACH-E", "Battery Electric Vehicle (BEV)", 0),
];

/// (city, county, postal codes)
const PLACES: [(&str, &str, &[&str]); 5] = [
    ("Seattle", "King", &["98101", "98103", "98115"]),
    ("Bellevue", "King", &["98004", "98006"]),
    ("Tacoma", "Pierce", &["98402"]),
    ("Olympia", "Thurston", &["98501", "98506"]),
    ("Yakima", "Yakima", &["98901"]),
];

/// Write a synthetic registration table for trying out the dashboard
#[derive(Parser)]
struct Args {
    /// Output file; `.csv` or `.parquet`
    #[arg(default_value = "sample_registrations.csv")]
    output: PathBuf,

    /// Number of registrations
    #[arg(short, long, default_value_t = 500)]
    rows: usize,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n.max(1)
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

/// One record per column in `COLUMNS` order. Roughly one in twenty ranges
/// is left blank, the way the published export reports unknown ranges.
fn generate_rows(n: usize, rng: &mut SimpleRng) -> Vec<[String; 8]> {
    (0..n)
        .map(|_| {
            let &(make, model, kind, typical) = rng.pick(&MODELS);
            let &(city, county, zips) = rng.pick(&PLACES);
            let zip = *rng.pick(zips);
            let year = 2011 + rng.below(14);
            let range = if rng.below(20) == 0 {
                String::new()
            } else if typical == 0 {
                "0".to_string()
            } else {
                (typical - typical / 10 + rng.below(typical / 5 + 1)).to_string()
            };
            [
                make.to_string(),
                model.to_string(),
                year.to_string(),
                kind.to_string(),
                city.to_string(),
                county.to_string(),
                zip.to_string(),
                range,
            ]
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[[String; 8]]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    writer.write_record(COLUMNS).context("writing CSV header")?;
    for row in rows {
        writer.write_record(row).context("writing CSV record")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[[String; 8]]) -> Result<()> {
    let schema = Arc::new(Schema::new(
        COLUMNS
            .iter()
            .map(|name| Field::new(*name, DataType::Utf8, true))
            .collect::<Vec<_>>(),
    ));

    let columns: Vec<ArrayRef> = (0..COLUMNS.len())
        .map(|col| {
            let mut builder = StringBuilder::new();
            for row in rows {
                if row[col].is_empty() {
                    builder.append_null();
                } else {
                    builder.append_value(&row[col]);
                }
            }
            Arc::new(builder.finish()) as ArrayRef
        })
        .collect();

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;
    let file = std::fs::File::create(path).context("creating output file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate_rows(args.rows, &mut rng);

    let is_parquet = args
        .output
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("parquet"));
    if is_parquet {
        write_parquet(&args.output, &rows)?;
    } else {
        write_csv(&args.output, &rows)?;
    }

    println!("Wrote {} registrations to {}", rows.len(), args.output.display());
    Ok(())
}

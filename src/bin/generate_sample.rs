use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// One CSV row; column names match what the dashboard expects.
#[derive(Serialize)]
struct Row {
    #[serde(rename = "Flight Number")]
    flight_number: i64,
    #[serde(rename = "Launch Site")]
    site: String,
    class: i64,
    #[serde(rename = "Payload Mass (kg)")]
    payload_kg: f64,
    #[serde(rename = "Booster Version Category")]
    booster_category: String,
}

/// Booster generations with their era's payload ceiling and success rate.
const BOOSTERS: [(&str, f64, f64); 5] = [
    ("v1.0", 700.0, 0.0),
    ("v1.1", 5000.0, 0.25),
    ("FT", 9600.0, 0.7),
    ("B4", 7000.0, 0.5),
    ("B5", 5400.0, 0.9),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "VAFB SLC-4E", "KSC LC-39A", "CCAFS SLC-40"];

fn generate(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    (0..n)
        .map(|i| {
            // Later flights use later boosters.
            let era = (i * BOOSTERS.len() / n).min(BOOSTERS.len() - 1);
            let (booster, ceiling, success_rate) = BOOSTERS[era];
            let site = if era == 0 { SITES[0] } else { rng.pick(&SITES) };
            let payload_kg = (rng.next_f64() * ceiling).round();
            let class = i64::from(rng.next_f64() < success_rate);
            Row {
                flight_number: i as i64 + 1,
                site: site.to_string(),
                class,
                payload_kg,
                booster_category: booster.to_string(),
            }
        })
        .collect()
}

fn write_csv(rows: &[Row], path: &str) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[Row], path: &str) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.flight_number))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.site.as_str()))),
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.class))),
            Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.payload_kg))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.booster_category.as_str()),
            )),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate(&mut rng, 56);

    write_csv(&rows, "spacex_launch_dash.csv")?;
    write_parquet(&rows, "spacex_launch_dash.parquet")?;

    let successes = rows.iter().filter(|r| r.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and .parquet",
        rows.len()
    );
    Ok(())
}

//! Writes a synthetic `vgsales.csv` with the same layout as the public dataset.

use anyhow::{Context, Result};

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    /// Heavy-tailed sales figure in millions, rounded to 2 decimals.
    fn sales(&mut self, scale: f64) -> f64 {
        let u = self.next_f64().max(1e-9);
        round2(scale * u.powi(3) * 4.0)
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

const GENRES: [&str; 12] = [
    "Action", "Adventure", "Fighting", "Misc", "Platform", "Puzzle", "Racing", "Role-Playing",
    "Shooter", "Simulation", "Sports", "Strategy",
];

/// Platform with its active years.
const PLATFORMS: [(&str, i32, i32); 8] = [
    ("NES", 1983, 1994),
    ("SNES", 1990, 1999),
    ("N64", 1996, 2002),
    ("PS", 1994, 2003),
    ("PS2", 2000, 2011),
    ("Wii", 2006, 2015),
    ("X360", 2005, 2016),
    ("PS4", 2013, 2020),
];

const PUBLISHERS: [&str; 5] = [
    "Nintendo",
    "Electronic Arts",
    "Activision",
    "Sony Computer Entertainment",
    "Ubisoft",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_rows = 2000;

    let mut rows: Vec<(String, String, String, String, String, [f64; 4])> = Vec::new();
    for i in 0..n_rows {
        let &(platform, first, last) = rng.pick(&PLATFORMS);
        let span = (last - first + 1) as u64;
        let year = first + (rng.next_u64() % span) as i32;
        // Roughly 1.5 % of the public dataset has no release year.
        let year = if rng.next_f64() < 0.015 {
            "N/A".to_string()
        } else {
            year.to_string()
        };
        let genre = rng.pick(&GENRES).to_string();
        let publisher = rng.pick(&PUBLISHERS).to_string();
        let jp_scale = if platform.starts_with('N') || platform == "SNES" { 1.0 } else { 0.3 };
        let regional = [
            rng.sales(1.0),
            rng.sales(0.6),
            rng.sales(jp_scale),
            rng.sales(0.2),
        ];
        rows.push((
            format!("Sample Title {i}"),
            platform.to_string(),
            year,
            genre,
            publisher,
            regional,
        ));
    }

    // Rank by global sales, best seller first.
    rows.sort_by(|a, b| b.5.iter().sum::<f64>().total_cmp(&a.5.iter().sum::<f64>()));

    let output_path = "vgsales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;
    writer.write_record([
        "Rank", "Name", "Platform", "Year", "Genre", "Publisher", "NA_Sales", "EU_Sales",
        "JP_Sales", "Other_Sales", "Global_Sales",
    ])?;

    for (rank, (name, platform, year, genre, publisher, regional)) in rows.iter().enumerate() {
        let global = round2(regional.iter().sum());
        writer.write_record([
            (rank + 1).to_string(),
            name.clone(),
            platform.clone(),
            year.clone(),
            genre.clone(),
            publisher.clone(),
            format!("{:.2}", regional[0]),
            format!("{:.2}", regional[1]),
            format!("{:.2}", regional[2]),
            format!("{:.2}", regional[3]),
            format!("{global:.2}"),
        ])?;
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {n_rows} titles to {output_path}");
    Ok(())
}

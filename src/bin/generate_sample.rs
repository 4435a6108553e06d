//! Writes a synthetic `data/Salaries.csv` for manual testing of the
//! dashboard.  Deterministic: the same seed always produces the same file.

use std::error::Error;

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

    /// Uniform float in [0, 1).
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform integer in [lo, hi].
    fn range(&mut self, lo: i64, hi: i64) -> i64 {
        lo + (self.uniform() * (hi - lo + 1) as f64) as i64
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let mut rng = SimpleRng::new(42);

    std::fs::create_dir_all("data")?;
    let mut writer = csv::Writer::from_path("data/Salaries.csv")?;
    writer.write_record([
        "rank",
        "discipline",
        "yrs.since.phd",
        "yrs.service",
        "sex",
        "salary",
    ])?;

    for _ in 0..400 {
        let rank_roll = rng.uniform();
        let rank = if rank_roll < 0.55 {
            "Prof"
        } else if rank_roll < 0.80 {
            "AssocProf"
        } else {
            "AsstProf"
        };

        let discipline = if rng.uniform() < 0.45 { "A" } else { "B" };
        let sex = if rng.uniform() < 0.10 { "Female" } else { "Male" };

        let yrs_since_phd = match rank {
            "Prof" => rng.range(12, 45),
            "AssocProf" => rng.range(6, 25),
            _ => rng.range(1, 10),
        };
        let yrs_service = rng.range(0, yrs_since_phd);

        let base = match rank {
            "Prof" => 120_000,
            "AssocProf" => 95_000,
            _ => 80_000,
        };
        let salary = base + yrs_service * 600 + rng.range(-12_000, 12_000);

        writer.write_record([
            rank,
            discipline,
            &yrs_since_phd.to_string(),
            &yrs_service.to_string(),
            sex,
            &salary.to_string(),
        ])?;
    }

    writer.flush()?;
    println!("Wrote data/Salaries.csv (400 rows)");
    Ok(())
}

use anyhow::{Context, Result};
use serde::Serialize;

/// One participant as written to the sample file.
#[derive(Debug, Serialize)]
struct SampleRecord {
    id: u32,
    age: Option<f64>,
    gender: &'static str,
    email: Option<String>,
    q1: Option<f64>,
    q2: Option<f64>,
    q3: Option<f64>,
    q4: Option<f64>,
    q5: Option<f64>,
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

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

const GENDERS: [&str; 3] = ["Female", "Male", "Other"];
const NAMES: [&str; 6] = ["alex", "dana", "kim", "noa", "sam", "yuval"];

fn grade(rng: &mut SimpleRng, ability: f64) -> Option<f64> {
    if rng.chance(0.08) {
        return None;
    }
    Some(rng.gauss(ability, 8.0).clamp(0.0, 100.0).round())
}

fn email(rng: &mut SimpleRng, id: u32) -> Option<String> {
    let name = NAMES[(rng.next_u64() % NAMES.len() as u64) as usize];
    match rng.next_u64() % 20 {
        0 => None,
        1 => Some(format!("{name}{id}.example.com")),
        2 => Some(format!("{name}{id}@example")),
        _ => Some(format!("{name}.{id}@example.com")),
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let n_participants = 200;

    let records: Vec<SampleRecord> = (0..n_participants)
        .map(|id| {
            let age = (!rng.chance(0.05)).then(|| rng.gauss(38.0, 14.0).clamp(16.0, 95.0).round());
            let gender = GENDERS[(rng.next_u64() % GENDERS.len() as u64) as usize];
            let email = email(&mut rng, id);
            let ability = rng.gauss(72.0, 10.0);
            SampleRecord {
                id,
                age,
                gender,
                email,
                q1: grade(&mut rng, ability),
                q2: grade(&mut rng, ability),
                q3: grade(&mut rng, ability),
                q4: grade(&mut rng, ability),
                q5: grade(&mut rng, ability),
            }
        })
        .collect();

    let output_path = "sample_data.json";
    let json = serde_json::to_string_pretty(&records).context("serializing sample records")?;
    std::fs::write(output_path, json).with_context(|| format!("writing {output_path}"))?;

    println!("Wrote {} participants to {output_path}", records.len());
    Ok(())
}

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveTime};

use space_missions::data::loader::save_csv;
use space_missions::data::{MissionRecord, MissionStatus, RocketStatus};

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

    fn below(&mut self, n: u64) -> u64 {
        self.next_u64() % n
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[self.below(items.len() as u64) as usize]
    }
}

/// A launch provider active over `[first_year, last_year]`.
struct Operator {
    company: &'static str,
    location: &'static str,
    rockets: &'static [&'static str],
    first_year: i32,
    last_year: i32,
    launches_per_year: u64,
    price: Option<f64>,
}

const OPERATORS: &[Operator] = &[
    Operator {
        company: "RVSN USSR",
        location: "Site 31/6, Baikonur Cosmodrome, Kazakhstan",
        rockets: &["Vostok-2M", "Cosmos-3M (11K65M)", "Molniya-M /Block ML"],
        first_year: 1957,
        last_year: 1991,
        launches_per_year: 40,
        price: None,
    },
    Operator {
        company: "NASA",
        location: "LC-39A, Kennedy Space Center, Florida, USA",
        rockets: &["Saturn V", "Space Shuttle Atlantis", "Space Shuttle Discovery"],
        first_year: 1958,
        last_year: 2011,
        launches_per_year: 5,
        price: Some(450.0),
    },
    Operator {
        company: "Arianespace",
        location: "ELA-3, Guiana Space Centre, French Guiana, France",
        rockets: &["Ariane 5 ECA", "Ariane 44L", "Soyuz ST-B/Fregat-MT"],
        first_year: 1984,
        last_year: 2022,
        launches_per_year: 8,
        price: Some(200.0),
    },
    Operator {
        company: "CASC",
        location: "LC-3, Xichang Satellite Launch Center, China",
        rockets: &["Long March 3B/E", "Long March 2D", "Long March 4C"],
        first_year: 1970,
        last_year: 2022,
        launches_per_year: 12,
        price: Some(29.75),
    },
    Operator {
        company: "SpaceX",
        location: "SLC-40, Cape Canaveral SFS, Florida, USA",
        rockets: &["Falcon 9 Block 5", "Falcon Heavy"],
        first_year: 2006,
        last_year: 2022,
        launches_per_year: 20,
        price: Some(67.0),
    },
    Operator {
        company: "ISRO",
        location: "Second Launch Pad, Satish Dhawan Space Centre, India",
        rockets: &["PSLV-XL", "GSLV Mk III"],
        first_year: 1979,
        last_year: 2022,
        launches_per_year: 3,
        price: Some(31.0),
    },
];

fn random_status(rng: &mut SimpleRng, year: i32) -> MissionStatus {
    // reliability improves over the decades
    let failure_rate = if year < 1970 { 0.25 } else if year < 1990 { 0.10 } else { 0.05 };
    let roll = rng.next_f64();
    if roll >= failure_rate {
        MissionStatus::Success
    } else if roll < failure_rate * 0.75 {
        MissionStatus::Failure
    } else if roll < failure_rate * 0.97 {
        MissionStatus::PartialFailure
    } else {
        MissionStatus::PrelaunchFailure
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let mut records: Vec<MissionRecord> = Vec::new();

    for op in OPERATORS {
        for year in op.first_year..=op.last_year {
            let launches = rng.below(op.launches_per_year * 2 + 1);
            let jan_1 = NaiveDate::from_ymd_opt(year, 1, 1).context("invalid year")?;
            for n in 0..launches {
                let launch_date = jan_1 + Duration::days(rng.below(365) as i64);
                let launch_time = (rng.next_f64() < 0.8)
                    .then(|| NaiveTime::from_hms_opt(rng.below(24) as u32, rng.below(60) as u32, 0))
                    .flatten();
                let rocket = *rng.pick(op.rockets);
                records.push(MissionRecord {
                    company: op.company.to_string(),
                    location: op.location.to_string(),
                    launch_date,
                    launch_time,
                    rocket: rocket.to_string(),
                    mission_name: format!("{} {}-{}", op.company, year, n + 1),
                    rocket_status: if op.last_year < 2022 {
                        RocketStatus::Retired
                    } else {
                        RocketStatus::Active
                    },
                    price: op.price.filter(|_| year >= 2000),
                    mission_status: random_status(&mut rng, year),
                });
            }
        }
    }

    // the real dataset is chronological
    records.sort_by_key(|m| m.launch_date);

    let output_path = Path::new("space_missions_sample.csv");
    save_csv(output_path, &records)
        .with_context(|| format!("writing {}", output_path.display()))?;

    println!(
        "Wrote {} missions from {} companies to {}",
        records.len(),
        OPERATORS.len(),
        output_path.display()
    );
    Ok(())
}

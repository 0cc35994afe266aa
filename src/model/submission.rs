/// One leaderboard submission as read from the input table.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub name: String,
    pub days_from_start: f64,
    pub score: f64,
    /// Position in the input file; breaks ties between equal elapsed times.
    pub index: usize,
}

impl Submission {
    pub fn new(name: &str, days_from_start: f64, score: f64, index: usize) -> Self {
        Self {
            name: name.to_string(),
            days_from_start,
            score,
            index,
        }
    }
}

pub fn day_bucket(days_from_start: f64) -> i64 {
    days_from_start.floor() as i64
}

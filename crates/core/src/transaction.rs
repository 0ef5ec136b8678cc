use chrono::NaiveDate;
use rand::Rng;

/// Display-only reference for the position card: `AU` + `DDMMYYYY` + a
/// zero-padded random 4-digit suffix, e.g. `AU191020260042`.
///
/// Not persisted, not validated, not unique.
pub fn transaction_id<R: Rng>(date: NaiveDate, rng: &mut R) -> String {
    let suffix: u16 = rng.gen_range(0..10_000);
    format!("AU{}{suffix:04}", date.format("%d%m%Y"))
}

/// Transaction id for today's local date.
pub fn new_transaction_id() -> String {
    let today = chrono::Local::now().date_naive();
    transaction_id(today, &mut rand::thread_rng())
}

pub mod util;

pub use util::{csv_field, drawn_at, split_csv};

mod results_table;

pub use results_table::{TableScan, scan_results};

mod supabase;

pub use supabase::{SinkFailure, SupabaseSink};

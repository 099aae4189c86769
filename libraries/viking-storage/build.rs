//! Build script for viking-storage.
//!
//! `sqlx::migrate!` embeds the migration files at compile time, so the crate
//! must rebuild whenever one is added or edited.

fn main() {
    println!("cargo:rerun-if-changed=migrations");
}

//! trybuild coverage for `#[env(crate = "...")]` support.
//!
//! Ensures generated code compiles when the crate is reached through an
//! alias instead of its own name.

#[test]
fn crate_path_alias_compiles() {
    let t = trybuild::TestCases::new();
    t.pass("tests/trybuild/crate_path_alias.rs");
}

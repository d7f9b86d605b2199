#[test]
fn album_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/album_error_pass.rs");
    t.pass("tests/ui/album_error_context.rs");
    t.compile_fail("tests/ui/album_error_missing_context.rs");
}

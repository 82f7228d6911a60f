use anyhow::Result;

use solbench::synonyms::is_equivalent;

/// Exit code doubles as the verdict for scripted graders: 0 when the
/// labels match, 1 when they do not.
pub fn run(expected: &str, answer: &str) -> Result<()> {
    if is_equivalent(expected, answer) {
        println!("equivalent");
        Ok(())
    } else {
        println!("not equivalent");
        std::process::exit(1);
    }
}

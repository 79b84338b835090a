use std::io::Read;
use std::path::Path;

use anyhow::Context;
use snip_core::{PackageDetector, PackageToken};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::DetectArgs;
use crate::output::output;

/// Handle `snip detect`.
pub fn handle(args: &DetectArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let code = read_source(&args.path)?;
    let packages = detect(&code, &args.removed)?;
    output(&packages, flags.format)
}

fn read_source(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        let mut code = String::new();
        std::io::stdin()
            .read_to_string(&mut code)
            .context("failed to read snippet source from stdin")?;
        return Ok(code);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn detect(code: &str, removed: &[String]) -> anyhow::Result<Vec<PackageToken>> {
    let mut detector = PackageDetector::default();
    for spec in removed {
        let package =
            PackageToken::parse(spec).with_context(|| format!("invalid --remove '{spec}'"))?;
        detector.remove(&package);
    }
    Ok(detector.detect(code))
}

use anyhow::Context;
use serde::Deserialize;

/// Crate that must stay free of UI and platform dependencies
const DOMAIN_CRATE: &str = "streamview-domain";

/// Dependencies the domain crate may not take (normal or build)
const FORBIDDEN_DOMAIN_DEPS: &[&str] = &["dioxus", "web-sys", "js-sys", "wasm-bindgen", "tokio"];

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    match args.next().as_deref() {
        Some("arch-check") => arch_check(),
        Some(cmd) => anyhow::bail!("Unknown xtask command: {cmd}"),
        None => anyhow::bail!("Usage: cargo xtask <command>\n\nCommands:\n  arch-check"),
    }
}

#[derive(Debug, Deserialize)]
struct Metadata {
    packages: Vec<Package>,
}

#[derive(Debug, Deserialize)]
struct Package {
    name: String,
    dependencies: Vec<Dependency>,
}

#[derive(Debug, Deserialize)]
struct Dependency {
    name: String,
    /// `null` for normal dependencies, otherwise `"dev"` or `"build"`
    kind: Option<String>,
}

fn arch_check() -> anyhow::Result<()> {
    let output = std::process::Command::new("cargo")
        .args(["metadata", "--format-version", "1", "--no-deps"])
        .output()
        .context("running cargo metadata")?;

    if !output.status.success() {
        anyhow::bail!("cargo metadata failed")
    }

    let metadata: Metadata =
        serde_json::from_slice(&output.stdout).context("parsing cargo metadata output")?;

    let violations = domain_violations(&metadata)?;
    if !violations.is_empty() {
        for dep in &violations {
            eprintln!("{DOMAIN_CRATE} must not depend on {dep}");
        }
        anyhow::bail!("arch-check failed with {} violation(s)", violations.len());
    }

    println!("arch-check passed");
    Ok(())
}

fn domain_violations(metadata: &Metadata) -> anyhow::Result<Vec<String>> {
    let domain = metadata
        .packages
        .iter()
        .find(|p| p.name == DOMAIN_CRATE)
        .with_context(|| format!("{DOMAIN_CRATE} not found in workspace"))?;

    Ok(domain
        .dependencies
        .iter()
        .filter(|d| d.kind.as_deref() != Some("dev"))
        .filter(|d| FORBIDDEN_DOMAIN_DEPS.contains(&d.name.as_str()))
        .map(|d| d.name.clone())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(json: &str) -> Metadata {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn clean_domain_passes() {
        let m = metadata(
            r#"{"packages":[{"name":"streamview-domain","dependencies":[
                {"name":"serde","kind":null},
                {"name":"tokio","kind":"dev"}
            ]}]}"#,
        );
        assert!(domain_violations(&m).unwrap().is_empty());
    }

    #[test]
    fn ui_dependency_is_reported() {
        let m = metadata(
            r#"{"packages":[{"name":"streamview-domain","dependencies":[
                {"name":"dioxus","kind":null},
                {"name":"url","kind":null}
            ]}]}"#,
        );
        assert_eq!(domain_violations(&m).unwrap(), vec!["dioxus".to_string()]);
    }

    #[test]
    fn missing_domain_crate_is_an_error() {
        let m = metadata(r#"{"packages":[]}"#);
        assert!(domain_violations(&m).is_err());
    }
}

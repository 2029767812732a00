//! Environment overrides for layered settings.

mod test_helpers;

use gecko::{settings::Settings, team::domain::SuccessionPolicy};
use test_helpers::EnvVarGuard;

#[test]
fn environment_overrides_defaults() -> eyre::Result<()> {
    let _guard = EnvVarGuard::apply(&[
        ("GECKO__TEAMS__SUCCESSION", Some("explicit")),
        ("GECKO__ACTIVATION__SITE_DOMAIN", Some("gecko.example.org")),
        ("GECKO__ACTIVATION__SECRET", None),
    ]);

    let settings = Settings::load()?;

    eyre::ensure!(settings.teams.succession == SuccessionPolicy::Explicit);
    eyre::ensure!(settings.activation.site_domain == "gecko.example.org");
    eyre::ensure!(settings.activation.secret == "change-me-in-production");
    Ok(())
}

#[test]
fn blank_secret_from_environment_is_rejected() {
    let _guard = EnvVarGuard::apply(&[("GECKO__ACTIVATION__SECRET", Some("   "))]);

    assert!(Settings::load().is_err());
}

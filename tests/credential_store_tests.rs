//! File-backed credential registry: durability and data-integrity handling.

mod common;

use anyhow::Result;
use tempfile::tempdir;

use common::{config, login_form, signup};
use rsms::config::PortalConfig;
use rsms::content::{DashboardPage, FormKind};
use rsms::error::AppError;
use rsms::identity::{AuthError, CredentialStore, LocalCredentialStore, Registration, Role, SessionStore};
use rsms::router::{NavProjection, Route};
use rsms::Portal;

fn reg(email: &str, role: Role) -> Registration {
    Registration { name: "Ann".into(), email: email.into(), password: "s3cr3t!".into(), role }
}

#[test]
fn registrations_survive_reopen() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("nested").join("users.json");
    {
        let store = LocalCredentialStore::open(&path)?;
        assert!(store.is_empty());
        store.register(&reg("a@x.com", Role::GovernmentOfficer))?;
    }
    let store = LocalCredentialStore::open(&path)?;
    assert_eq!(store.len(), 1);
    let id = store.authenticate("a@x.com", "s3cr3t!", Role::GovernmentOfficer)?;
    assert_eq!(id.name, "Ann");
    // password is not stored in clear
    let text = std::fs::read_to_string(&path)?;
    assert!(!text.contains("s3cr3t!"));
    Ok(())
}

#[test]
fn writes_replace_the_file_without_leftovers() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("users.json");
    let store = LocalCredentialStore::open(&path)?;
    store.register(&reg("a@x.com", Role::GovernmentOfficer))?;
    store.register(&reg("b@x.com", Role::RailwayOfficer))?;

    let names: Vec<String> = std::fs::read_dir(tmp.path())?
        .map(|e| e.map(|e| e.file_name().to_string_lossy().into_owned()))
        .collect::<std::io::Result<_>>()?;
    assert_eq!(names, vec!["users.json".to_string()]);
    assert_eq!(LocalCredentialStore::open(&path)?.len(), 2);
    Ok(())
}

#[test]
fn failed_write_rolls_back_the_registration() -> Result<()> {
    let tmp = tempdir()?;
    // the target is a directory, so the rename over it fails
    let path = tmp.path().join("users.json");
    let store = LocalCredentialStore::open(&path)?;
    std::fs::create_dir(&path)?;
    std::fs::write(path.join("keep"), "x")?;
    let res = store.register(&reg("a@x.com", Role::GovernmentOfficer));
    assert!(matches!(res, Err(AuthError::Storage(_))));
    assert!(store.is_empty());
    assert!(!tmp.path().join("users.json.tmp").exists());
    Ok(())
}

#[test]
fn unknown_stored_role_is_rejected() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("users.json");
    LocalCredentialStore::open(&path)?.register(&reg("a@x.com", Role::RailwayOfficer))?;

    let text = std::fs::read_to_string(&path)?.replace("Railway Officer", "Station Master");
    std::fs::write(&path, text)?;

    let store = LocalCredentialStore::open(&path)?;
    let res = store.authenticate("a@x.com", "s3cr3t!", Role::RailwayOfficer);
    assert!(matches!(res, Err(AuthError::UnknownRole(ref r)) if r == "Station Master"));
    Ok(())
}

#[test]
fn legacy_government_role_is_accepted() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("users.json");
    LocalCredentialStore::open(&path)?.register(&reg("g@x.com", Role::GovernmentOfficer))?;
    let text = std::fs::read_to_string(&path)?.replace("Government Officer", "Government");
    std::fs::write(&path, text)?;

    let store = LocalCredentialStore::open(&path)?;
    let id = store.authenticate("g@x.com", "s3cr3t!", Role::GovernmentOfficer)?;
    assert_eq!(id.role, Role::GovernmentOfficer);
    // legacy records present exactly like current ones
    let page = DashboardPage::for_identity(&id, "GOV-2026-001".into());
    assert_eq!(page.profile.badge, "Government Official");
    let nav = NavProjection::project(Some(&SessionStore::new().set(id)));
    assert_eq!(nav.badge.map(|b| b.label).as_deref(), Some("Government Officer"));
    Ok(())
}

#[test]
fn corrupt_file_fails_to_open() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("users.json");
    std::fs::write(&path, "{not json")?;
    let err = LocalCredentialStore::open(&path).err().expect("open should fail");
    assert!(err.to_string().contains("parsing users file"));
    Ok(())
}

#[test]
fn portal_uses_configured_users_file() -> Result<()> {
    let tmp = tempdir()?;
    let cfg = PortalConfig { users_file: Some(tmp.path().join("users.json")), ..config() };

    let mut first = Portal::new(cfg.clone())?;
    first.load();
    signup(&mut first, "Ann", "a@x.com", "pw", Role::RailwayOfficer);

    // a new tab sees the registration but not the old session
    let mut second = Portal::new(cfg)?;
    second.load();
    assert!(second.session().is_none());
    second.navigate("#/login");
    second.select_role(FormKind::Login, Role::RailwayOfficer);
    second.submit_login(&login_form("a@x.com", "pw")).map_err(anyhow::Error::from)?;
    second.advance(1_000);
    assert_eq!(second.current_view(), Some(Route::Dashboard));
    Ok(())
}

#[test]
fn integrity_errors_surface_as_form_messages() -> Result<()> {
    let tmp = tempdir()?;
    let path = tmp.path().join("users.json");
    LocalCredentialStore::open(&path)?.register(&reg("a@x.com", Role::RailwayOfficer))?;
    let text = std::fs::read_to_string(&path)?.replace("Railway Officer", "Admin");
    std::fs::write(&path, text)?;

    let cfg = PortalConfig { users_file: Some(path), ..config() };
    let mut p = Portal::new(cfg)?;
    p.load();
    p.navigate("#/login");
    p.select_role(FormKind::Login, Role::RailwayOfficer);
    let err = p.submit_login(&login_form("a@x.com", "s3cr3t!")).unwrap_err();
    assert!(matches!(err, AppError::Integrity { .. }));
    assert!(p.message(FormKind::Login).unwrap().is_error());
    assert!(p.session().is_none());
    assert_eq!(p.current_view(), Some(Route::Login));
    Ok(())
}

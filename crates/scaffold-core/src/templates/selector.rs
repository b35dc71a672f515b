//! Rule-table selection of template bundles

use crate::project::{Configuration, DbLibrary, DbProvider, WebLibrary};
use crate::templates::manifest::BundleManifest;

/// Ordered bundle ids for a web/db/provider combination
///
/// Every matching rule contributes its bundles in table order; a bundle named
/// by more than one rule keeps its first position. An unset provider is
/// resolved to the library's baseline before matching.
pub fn select<'m>(
    manifest: &'m BundleManifest,
    web: WebLibrary,
    db: DbLibrary,
    provider: DbProvider,
) -> Vec<&'m str> {
    let provider = if provider == DbProvider::None {
        db.baseline_provider()
    } else {
        provider
    };

    let mut selected: Vec<&str> = Vec::new();
    for rule in manifest.rules.iter().filter(|r| r.matches(web, db, provider)) {
        for id in &rule.bundles {
            if !selected.contains(&id.as_str()) {
                selected.push(id);
            }
        }
    }
    selected
}

pub fn select_for<'m>(manifest: &'m BundleManifest, config: &Configuration) -> Vec<&'m str> {
    select(
        manifest,
        config.web_library,
        config.db_library,
        config.db_provider,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = r#"
rules:
  - web: set
    db: set
    bundles: [common]
  - web: gin
    db: set
    bundles: [gin]
  - web: fiber
    db: set
    bundles: [fiber]
  - web: gin
    db: unset
    bundles: [gin-lean]
  - web: unset
    db: set
    bundles: [common-lean]
  - db: gorm
    provider: gorm-mysql
    bundles: [gorm-mysql]
  - db: gorm
    provider: gorm-postgres
    bundles: [gorm-postgres]
  - db: sqlx
    provider: postgres
    bundles: [sqlx-postgres]
  - db: sqlx
    provider: mysql
    bundles: [sqlx-mysql]
"#;

    fn table() -> BundleManifest {
        serde_yaml::from_str(TABLE).unwrap()
    }

    #[test]
    fn test_full_project_with_baseline_provider() {
        let m = table();
        assert_eq!(
            select(&m, WebLibrary::Gin, DbLibrary::Gorm, DbProvider::None),
            vec!["common", "gin", "gorm-mysql"]
        );
    }

    #[test]
    fn test_explicit_provider_wins_over_baseline() {
        let m = table();
        assert_eq!(
            select(&m, WebLibrary::Fiber, DbLibrary::Sqlx, DbProvider::Postgres),
            vec!["common", "fiber", "sqlx-postgres"]
        );
    }

    #[test]
    fn test_nothing_selected_without_libraries() {
        let m = table();
        assert!(select(&m, WebLibrary::None, DbLibrary::None, DbProvider::None).is_empty());
    }

    #[test]
    fn test_web_only_gets_lean_bundle() {
        let m = table();
        assert_eq!(
            select(&m, WebLibrary::Gin, DbLibrary::None, DbProvider::None),
            vec!["gin-lean"]
        );
    }

    #[test]
    fn test_db_only_gets_lean_common() {
        let m = table();
        assert_eq!(
            select(&m, WebLibrary::None, DbLibrary::Gorm, DbProvider::GormPostgres),
            vec!["common-lean", "gorm-postgres"]
        );
    }

    #[test]
    fn test_duplicate_bundles_keep_first_position() {
        let yaml = r#"
rules:
  - bundles: [common, gin]
  - web: gin
    bundles: [gin, extra, common]
"#;
        let m: BundleManifest = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            select(&m, WebLibrary::Gin, DbLibrary::None, DbProvider::None),
            vec!["common", "gin", "extra"]
        );
    }

    #[test]
    fn test_selection_reads_only_library_fields() {
        let m = table();
        let mut a = Configuration::new("alpha");
        a.web_library = WebLibrary::Gin;
        a.set_db_library(DbLibrary::Sqlx);
        a.set_db_provider(DbProvider::Mysql);

        let mut b = a.clone();
        b.name = "beta".to_string();
        b.do_vendor = true;
        b.add_dependency("github.com/spf13/cobra");

        assert_eq!(select_for(&m, &a), select_for(&m, &b));
        assert_eq!(select_for(&m, &a), select_for(&m, &a));
    }

    #[test]
    fn test_full_project_always_starts_with_common() {
        let m = table();
        for web in [WebLibrary::Gin, WebLibrary::Fiber] {
            for db in [DbLibrary::Sqlx, DbLibrary::Gorm] {
                for &provider in db.providers() {
                    let picked = select(&m, web, db, provider);
                    assert_eq!(picked.len(), 3, "{:?}/{:?}/{:?}", web, db, provider);
                    assert_eq!(picked[0], "common");
                    assert_eq!(picked[1], web.id());
                    assert_eq!(picked[2], format!("{}-{}", db.id(), provider_suffix(provider)));
                }
            }
        }
    }

    fn provider_suffix(provider: DbProvider) -> &'static str {
        match provider {
            DbProvider::Postgres | DbProvider::GormPostgres => "postgres",
            _ => "mysql",
        }
    }
}

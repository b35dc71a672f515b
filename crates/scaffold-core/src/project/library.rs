//! Library and provider choices offered by the wizard

use std::fmt;
use std::str::FromStr;

/// Web framework the generated project is built around
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WebLibrary {
    #[default]
    None,
    Gin,
    Fiber,
    GorillaMux,
    NetHttp,
}

impl WebLibrary {
    /// Wizard order; `None` ("other") is offered last
    pub const ALL: [WebLibrary; 5] = [
        WebLibrary::Gin,
        WebLibrary::Fiber,
        WebLibrary::GorillaMux,
        WebLibrary::NetHttp,
        WebLibrary::None,
    ];

    /// Identifier used in the bundle manifest
    pub fn id(&self) -> &'static str {
        match self {
            WebLibrary::None => "none",
            WebLibrary::Gin => "gin",
            WebLibrary::Fiber => "fiber",
            WebLibrary::GorillaMux => "gorillamux",
            WebLibrary::NetHttp => "nethttp",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WebLibrary::None => "other",
            WebLibrary::Gin => "Gin",
            WebLibrary::Fiber => "Fiber",
            WebLibrary::GorillaMux => "Gorilla/mux",
            WebLibrary::NetHttp => "net/http (and other compatible libraries)",
        }
    }

    /// Go import path, empty for `None`
    pub fn module_path(&self) -> &'static str {
        match self {
            WebLibrary::None => "",
            WebLibrary::Gin => "github.com/gin-gonic/gin",
            WebLibrary::Fiber => "github.com/gofiber/fiber/v2",
            WebLibrary::GorillaMux => "github.com/gorilla/mux",
            WebLibrary::NetHttp => "net/http",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != WebLibrary::None
    }
}

/// Database access library
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DbLibrary {
    #[default]
    None,
    /// `database/sql`
    Sql,
    /// `sqlx`, a thin layer over `database/sql`
    Sqlx,
    /// `gorm`, the ORM
    Gorm,
}

impl DbLibrary {
    pub const ALL: [DbLibrary; 4] = [
        DbLibrary::Sql,
        DbLibrary::Sqlx,
        DbLibrary::Gorm,
        DbLibrary::None,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            DbLibrary::None => "none",
            DbLibrary::Sql => "sql",
            DbLibrary::Sqlx => "sqlx",
            DbLibrary::Gorm => "gorm",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DbLibrary::None => "None",
            DbLibrary::Sql => "sql",
            DbLibrary::Sqlx => "sqlx",
            DbLibrary::Gorm => "gorm",
        }
    }

    pub fn module_path(&self) -> &'static str {
        match self {
            DbLibrary::None => "",
            DbLibrary::Sql => "database/sql",
            DbLibrary::Sqlx => "github.com/jmoiron/sqlx",
            DbLibrary::Gorm => "gorm.io/gorm",
        }
    }

    pub fn is_set(&self) -> bool {
        *self != DbLibrary::None
    }

    /// Providers compatible with this library, in wizard order
    pub fn providers(&self) -> &'static [DbProvider] {
        match self {
            DbLibrary::None => &[],
            DbLibrary::Sql | DbLibrary::Sqlx => &[DbProvider::Postgres, DbProvider::Mysql],
            DbLibrary::Gorm => &[DbProvider::GormPostgres, DbProvider::GormMysql],
        }
    }

    /// Provider assumed when the library is chosen without an explicit provider
    pub fn baseline_provider(&self) -> DbProvider {
        match self {
            DbLibrary::None => DbProvider::None,
            DbLibrary::Sql | DbLibrary::Sqlx => DbProvider::Mysql,
            DbLibrary::Gorm => DbProvider::GormMysql,
        }
    }

    pub fn requires_provider(&self) -> bool {
        !self.providers().is_empty()
    }

    pub fn accepts(&self, provider: DbProvider) -> bool {
        self.providers().contains(&provider)
    }
}

/// Database driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DbProvider {
    #[default]
    None,
    Postgres,
    Mysql,
    GormPostgres,
    GormMysql,
}

impl DbProvider {
    pub fn id(&self) -> &'static str {
        match self {
            DbProvider::None => "none",
            DbProvider::Postgres => "postgres",
            DbProvider::Mysql => "mysql",
            DbProvider::GormPostgres => "gorm-postgres",
            DbProvider::GormMysql => "gorm-mysql",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            DbProvider::None => "none",
            DbProvider::Postgres | DbProvider::GormPostgres => "PostgreSQL",
            DbProvider::Mysql | DbProvider::GormMysql => "MySQL/MariaDB",
        }
    }

    pub fn module_path(&self) -> &'static str {
        match self {
            DbProvider::None => "",
            DbProvider::Postgres => "github.com/lib/pq",
            DbProvider::Mysql => "github.com/go-sql-driver/mysql",
            DbProvider::GormPostgres => "gorm.io/driver/postgres",
            DbProvider::GormMysql => "gorm.io/driver/mysql",
        }
    }
}

/// Error returned when parsing an unknown library or provider id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChoice {
    pub kind: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownChoice {}

macro_rules! impl_choice_traits {
    ($ty:ty, $kind:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = UnknownChoice;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v| v.id().eq_ignore_ascii_case(s))
                    .ok_or_else(|| UnknownChoice {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.display_name())
            }
        }
    };
}

impl_choice_traits!(
    WebLibrary,
    "web library",
    [
        WebLibrary::None,
        WebLibrary::Gin,
        WebLibrary::Fiber,
        WebLibrary::GorillaMux,
        WebLibrary::NetHttp,
    ]
);

impl_choice_traits!(
    DbLibrary,
    "db library",
    [DbLibrary::None, DbLibrary::Sql, DbLibrary::Sqlx, DbLibrary::Gorm]
);

impl_choice_traits!(
    DbProvider,
    "db provider",
    [
        DbProvider::None,
        DbProvider::Postgres,
        DbProvider::Mysql,
        DbProvider::GormPostgres,
        DbProvider::GormMysql,
    ]
);

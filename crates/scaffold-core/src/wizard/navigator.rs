//! Step sequencing and the summary dispatch table

use super::step::{Choice, MultiChoice, SingleChoice, TextInput};
use super::{
    Continuation, Flow, Input, View, ViewItem, MULTI_CHOICE_HELP, SINGLE_CHOICE_HELP, TEXT_HELP,
};
use crate::error::{Result, ScaffoldError};
use crate::project::{Configuration, DbLibrary, DbProvider, WebLibrary};
use crate::templates::Catalog;

/// Packages offered on the common packages screen: label and module path
pub const COMMON_PACKAGES: [(&str, &str); 5] = [
    ("Use spf13/cobra", "github.com/spf13/cobra"),
    ("Use redis", "github.com/go-redis/redis"),
    ("Use cleanenv", "github.com/ilyakaznacheev/cleanenv"),
    ("Use MongoDB", "github.com/mongodb/mongo-go-driver/mongo"),
    ("Use AMQP", "github.com/rabbitmq/amqp091-go"),
];

/// Purpose of a wizard screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StepKind {
    ProjectName,
    WebLibrary,
    DbLibrary,
    DbProvider,
    CommonPackages,
    ExtraPackages,
    Vendoring,
    Summary,
}

impl StepKind {
    /// Successor on the first pass through the wizard
    fn forward(self) -> StepKind {
        match self {
            StepKind::ProjectName => StepKind::WebLibrary,
            StepKind::WebLibrary => StepKind::DbLibrary,
            StepKind::DbLibrary | StepKind::DbProvider => StepKind::CommonPackages,
            StepKind::CommonPackages => StepKind::ExtraPackages,
            StepKind::ExtraPackages => StepKind::Vendoring,
            StepKind::Vendoring | StepKind::Summary => StepKind::Summary,
        }
    }
}

/// One entry of the summary screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Facet {
    Name,
    WebLibrary,
    DbLibrary,
    RemoveDependency(String),
    AddDependency,
    Vendoring,
    Build,
}

impl Facet {
    pub fn label(&self, config: &Configuration) -> String {
        match self {
            Facet::Name => format!("Project name: {}", config.name),
            Facet::WebLibrary if config.web_library.is_set() => {
                format!("Web library: {}", config.web_library.display_name())
            }
            Facet::WebLibrary => {
                "No web library (no helper/util functions will be written)".to_string()
            }
            Facet::DbLibrary if config.db_library.is_set() => format!(
                "DB library: {}, with driver: {}",
                config.db_library.display_name(),
                config.resolved_provider().display_name()
            ),
            Facet::DbLibrary => {
                "No DB library selected (no code example will be generated)".to_string()
            }
            Facet::RemoveDependency(dep) => format!("Remove dependency: {}", dep),
            Facet::AddDependency => "Add dependency".to_string(),
            Facet::Vendoring => format!("Vendoring: {}", config.do_vendor),
            Facet::Build => "Build".to_string(),
        }
    }
}

/// Summary entries for `config`, in display order
pub fn facets(config: &Configuration) -> Vec<Facet> {
    let mut facets = vec![Facet::Name, Facet::WebLibrary, Facet::DbLibrary];
    facets.extend(
        config
            .dependencies
            .iter()
            .cloned()
            .map(Facet::RemoveDependency),
    );
    facets.extend([Facet::AddDependency, Facet::Vendoring, Facet::Build]);
    facets
}

#[derive(Debug)]
enum Step {
    ProjectName(TextInput),
    WebLibrary(SingleChoice<WebLibrary>),
    DbLibrary(SingleChoice<DbLibrary>),
    DbProvider(SingleChoice<DbProvider>),
    CommonPackages(MultiChoice<&'static str>),
    ExtraPackages(TextInput),
    Vendoring(SingleChoice<bool>),
    Summary(SingleChoice<Facet>),
}

impl Step {
    fn build(kind: StepKind, config: &Configuration, continuation: Continuation) -> Step {
        match kind {
            StepKind::ProjectName => {
                Step::ProjectName(TextInput::new("Enter your project name", config.name.clone()))
            }
            StepKind::WebLibrary => Step::WebLibrary(
                SingleChoice::new(
                    "Choose your base library",
                    WebLibrary::ALL
                        .iter()
                        .map(|&w| Choice::new(w.display_name(), w))
                        .collect(),
                )
                .with_cursor_on(&config.web_library),
            ),
            StepKind::DbLibrary => Step::DbLibrary(
                SingleChoice::new(
                    "Select a db library",
                    DbLibrary::ALL
                        .iter()
                        .map(|&d| Choice::new(d.display_name(), d))
                        .collect(),
                )
                .with_cursor_on(&config.db_library),
            ),
            StepKind::DbProvider => Step::DbProvider(
                SingleChoice::new(
                    "Select a DBMS",
                    config
                        .db_library
                        .providers()
                        .iter()
                        .map(|&p| Choice::new(p.display_name(), p))
                        .collect(),
                )
                .with_cursor_on(&config.resolved_provider()),
            ),
            StepKind::CommonPackages => Step::CommonPackages(MultiChoice::new(
                "Choose between common packages",
                COMMON_PACKAGES
                    .iter()
                    .map(|&(label, module)| Choice::new(label, module))
                    .collect(),
            )),
            StepKind::ExtraPackages => Step::ExtraPackages(TextInput::new(
                "Enter other packages you want to use",
                "Leave empty if you don't want to use any other packages",
            )),
            StepKind::Vendoring => Step::Vendoring(
                SingleChoice::new(
                    "Do you want to use vendoring?",
                    vec![Choice::new("Yes", true), Choice::new("No", false)],
                )
                .with_cursor_on(&config.do_vendor),
            ),
            StepKind::Summary => {
                let cursor = match continuation {
                    Continuation::Summary { cursor } => cursor,
                    Continuation::Forward => 0,
                };
                let choices = facets(config)
                    .into_iter()
                    .map(|f| Choice::new(f.label(config), f))
                    .collect();
                Step::Summary(SingleChoice::new("Summary", choices).with_cursor(cursor))
            }
        }
    }

    fn kind(&self) -> StepKind {
        match self {
            Step::ProjectName(_) => StepKind::ProjectName,
            Step::WebLibrary(_) => StepKind::WebLibrary,
            Step::DbLibrary(_) => StepKind::DbLibrary,
            Step::DbProvider(_) => StepKind::DbProvider,
            Step::CommonPackages(_) => StepKind::CommonPackages,
            Step::ExtraPackages(_) => StepKind::ExtraPackages,
            Step::Vendoring(_) => StepKind::Vendoring,
            Step::Summary(_) => StepKind::Summary,
        }
    }

    fn handle(&mut self, input: Input) -> bool {
        match self {
            Step::ProjectName(t) | Step::ExtraPackages(t) => t.handle(input),
            Step::WebLibrary(s) => s.handle(input),
            Step::DbLibrary(s) => s.handle(input),
            Step::DbProvider(s) => s.handle(input),
            Step::CommonPackages(m) => m.handle(input),
            Step::Vendoring(s) => s.handle(input),
            Step::Summary(s) => s.handle(input),
        }
    }
}

/// The confirmed value of the active step
enum Answer {
    Text(String),
    Web(WebLibrary),
    Db(DbLibrary),
    Provider(DbProvider),
    Packages(Vec<&'static str>),
    Vendor(bool),
    Facet(usize),
}

/// Drives one active step at a time and commits answers into the configuration
pub struct Navigator {
    config: Configuration,
    catalog: Catalog,
    step: Step,
    continuation: Continuation,
}

impl Navigator {
    pub fn new(mut config: Configuration, catalog: Catalog) -> Self {
        config.template_hook = catalog.hook_for(&config);
        let step = Step::build(StepKind::ProjectName, &config, Continuation::Forward);
        Self {
            config,
            catalog,
            step,
            continuation: Continuation::Forward,
        }
    }

    pub fn current(&self) -> StepKind {
        self.step.kind()
    }

    pub fn continuation(&self) -> Continuation {
        self.continuation
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn into_config(self) -> Configuration {
        self.config
    }

    /// Whether character keys should be typed rather than interpreted
    pub fn is_text_entry(&self) -> bool {
        matches!(self.step, Step::ProjectName(_) | Step::ExtraPackages(_))
    }

    /// Bundles the current selection would render
    pub fn planned_bundles(&self) -> Vec<&str> {
        self.catalog.select(&self.config)
    }

    pub fn handle(&mut self, input: Input) -> Result<Flow> {
        match input {
            Input::Quit => {
                tracing::info!(step = ?self.current(), "wizard cancelled");
                Ok(Flow::Quit)
            }
            Input::Confirm => self.confirm(),
            Input::Tick | Input::Resize => Ok(Flow::Continue),
            other => {
                self.step.handle(other);
                Ok(Flow::Continue)
            }
        }
    }

    fn answer(&self) -> Option<Answer> {
        match &self.step {
            Step::ProjectName(t) | Step::ExtraPackages(t) => {
                Some(Answer::Text(t.value().trim().to_string()))
            }
            Step::WebLibrary(s) => s.selected().copied().map(Answer::Web),
            Step::DbLibrary(s) => s.selected().copied().map(Answer::Db),
            Step::DbProvider(s) => s.selected().copied().map(Answer::Provider),
            Step::CommonPackages(m) => Some(Answer::Packages(
                m.selected().into_iter().copied().collect(),
            )),
            Step::Vendoring(s) => s.selected().copied().map(Answer::Vendor),
            Step::Summary(s) => Some(Answer::Facet(s.cursor())),
        }
    }

    fn confirm(&mut self) -> Result<Flow> {
        let kind = self.current();
        let Some(answer) = self.answer() else {
            return Ok(Flow::Continue);
        };

        let mut entered_text = false;
        match answer {
            Answer::Text(text) => {
                // empty input keeps the current value
                entered_text = !text.is_empty();
                if entered_text && kind == StepKind::ProjectName {
                    self.config.name = text;
                } else if entered_text {
                    self.config.add_dependency(&text);
                }
            }
            Answer::Web(library) => {
                self.config.web_library = library;
                self.rebind_hook();
            }
            Answer::Db(library) => {
                self.config.set_db_library(library);
                self.rebind_hook();
            }
            Answer::Provider(provider) => {
                self.config.set_db_provider(provider);
                self.rebind_hook();
            }
            Answer::Packages(packages) => {
                for package in packages {
                    self.config.add_dependency(package);
                }
            }
            Answer::Vendor(vendor) => self.config.do_vendor = vendor,
            Answer::Facet(cursor) => return self.select_facet(cursor),
        }

        tracing::debug!(step = ?kind, config = ?self.config, "committed step");
        let (next, continuation) = self.resolve(kind, entered_text);
        self.enter(next, continuation);
        Ok(Flow::Continue)
    }

    /// Next step after `from` was confirmed
    ///
    /// The provider screen and repeated package entries belong to the facet
    /// that opened them and keep its continuation. Everything else returns to
    /// the summary when opened from there, or moves forward.
    fn resolve(&self, from: StepKind, entered_text: bool) -> (StepKind, Continuation) {
        match (from, self.continuation) {
            (StepKind::DbLibrary, cont) if self.config.db_library.requires_provider() => {
                (StepKind::DbProvider, cont)
            }
            (StepKind::ExtraPackages, cont) if entered_text => (StepKind::ExtraPackages, cont),
            (_, Continuation::Summary { cursor }) => {
                (StepKind::Summary, Continuation::Summary { cursor })
            }
            (from, Continuation::Forward) => (from.forward(), Continuation::Forward),
        }
    }

    /// Act on the summary entry at `cursor`
    pub fn select_facet(&mut self, cursor: usize) -> Result<Flow> {
        let facets = facets(&self.config);
        let facet = facets
            .get(cursor)
            .cloned()
            .ok_or(ScaffoldError::UnknownFacet {
                index: cursor,
                len: facets.len(),
            })?;
        let back = Continuation::Summary { cursor };

        match facet {
            Facet::Name => self.enter(StepKind::ProjectName, back),
            Facet::WebLibrary => self.enter(StepKind::WebLibrary, back),
            Facet::DbLibrary => self.enter(StepKind::DbLibrary, back),
            Facet::AddDependency => self.enter(StepKind::ExtraPackages, back),
            Facet::RemoveDependency(dep) => {
                self.config.remove_dependency(&dep);
                self.enter(StepKind::Summary, back);
            }
            Facet::Vendoring => {
                self.config.do_vendor = !self.config.do_vendor;
                self.enter(StepKind::Summary, back);
            }
            Facet::Build => {
                tracing::info!(config = ?self.config, "starting build");
                return Ok(Flow::Build);
            }
        }
        Ok(Flow::Continue)
    }

    fn enter(&mut self, kind: StepKind, continuation: Continuation) {
        self.step = Step::build(kind, &self.config, continuation);
        self.continuation = continuation;
    }

    fn rebind_hook(&mut self) {
        self.config.template_hook = self.catalog.hook_for(&self.config);
    }

    pub fn view(&self) -> View<'_> {
        match &self.step {
            Step::ProjectName(t) | Step::ExtraPackages(t) => View::Text {
                header: t.header(),
                value: t.value(),
                placeholder: t.placeholder(),
                cursor: t.cursor(),
                help: TEXT_HELP,
            },
            Step::WebLibrary(s) => single_view(s, None),
            Step::DbLibrary(s) => single_view(s, None),
            Step::DbProvider(s) => single_view(s, None),
            Step::Vendoring(s) => single_view(s, None),
            Step::Summary(s) => {
                let bundles = self.planned_bundles();
                let footer = if bundles.is_empty() {
                    "Templates: none".to_string()
                } else {
                    format!("Templates: {}", bundles.join(", "))
                };
                single_view(s, Some(footer))
            }
            Step::CommonPackages(m) => View::Choice {
                header: m.header(),
                items: m
                    .choices()
                    .iter()
                    .enumerate()
                    .map(|(i, c)| ViewItem {
                        label: &c.label,
                        checked: Some(m.is_checked(i)),
                    })
                    .collect(),
                cursor: m.cursor(),
                help: MULTI_CHOICE_HELP,
                footer: None,
            },
        }
    }
}

fn single_view<T>(step: &SingleChoice<T>, footer: Option<String>) -> View<'_> {
    View::Choice {
        header: step.header(),
        items: step
            .choices()
            .iter()
            .map(|c| ViewItem {
                label: &c.label,
                checked: None,
            })
            .collect(),
        cursor: step.cursor(),
        help: SINGLE_CHOICE_HELP,
        footer,
    }
}

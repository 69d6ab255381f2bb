//! Terminal front end: one invocation renders one dashboard page.

pub mod reporter;

use std::ffi::OsString;
use std::fmt::Display;
use std::io;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::Context;
use chrono::DateTime;
use chrono::Utc;
use clap::error::ErrorKind;
use clap::CommandFactory;
use clap::Parser;
use comfy_table::presets;
use comfy_table::CellAlignment;
use comfy_table::Table;
use console::Style;
use fieldx::fxstruct;
use garde::Validate;
use tracing::debug;
use tracing::info;
use tracing::instrument;

use crate::audit::audit;
use crate::export::CsvExport;
use crate::filter::Query;
use crate::filter::Searchable;
use crate::listing::Listing;
use crate::listing::Summarize;
use crate::listing::SummaryContext;
use crate::locale::Localization;
use crate::locale::is_date_format;
use crate::locale::is_datetime_format;
use crate::locale::DEFAULT_DATE_FORMAT;
use crate::locale::DEFAULT_DATETIME_FORMAT;
use crate::source::DataSource;
use crate::source::Dataset;
use crate::types::Selection;
use crate::types::ViewMode;
use crate::view::stats_table;
use crate::view::Render;
use crate::view::DEFAULT_GRID_COLUMNS;

pub use reporter::MsgType;
pub use reporter::Reporter;

/// Number of movements listed on the summary page.
const LATEST_MOVEMENTS: usize = 5;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Page {
    #[default]
    Summary,
    Products,
    Employees,
    Movements,
    Customers,
    Orders,
    Audit,
}

#[derive(Debug, Clone, clap::Parser, Validate)]
#[fxstruct(no_new, get(copy))]
#[clap(about, version, author, name = "distriboard")]
pub(crate) struct Cli {
    /// Page to show.
    #[clap(value_enum, env = "DISTRIBOARD_PAGE", default_value_t = Page::Summary)]
    #[garde(skip)]
    page: Page,

    /// JSON file with the dashboard data. The built-in sample is used when omitted.
    #[clap(long, env = "DISTRIBOARD_DATA")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    data: Option<PathBuf>,

    /// Case-insensitive text to look for in the page's searchable fields.
    #[clap(long, short, env = "DISTRIBOARD_SEARCH")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    search: Option<String>,

    /// Category, status or type to narrow the page to. ALL keeps everything.
    #[clap(long, short, env = "DISTRIBOARD_FILTER")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    filter: Option<String>,

    /// Cards or table.
    #[clap(long, value_enum, env = "DISTRIBOARD_VIEW", default_value_t = ViewMode::Grid)]
    #[garde(skip)]
    view: ViewMode,

    /// Cards per row in the grid view.
    #[clap(long, env = "DISTRIBOARD_COLUMNS", default_value_t = DEFAULT_GRID_COLUMNS)]
    #[garde(range(min = 1, max = 6))]
    columns: usize,

    /// Directory to save the page's CSV export into.
    #[clap(long, env = "DISTRIBOARD_EXPORT")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    export: Option<PathBuf>,

    /// Ignore accents when searching, so "maria" finds "María".
    #[clap(long, env = "DISTRIBOARD_FOLD_ACCENTS", default_value_t = false)]
    #[garde(skip)]
    fold_accents: bool,

    /// strftime format for dates. Only date fields are allowed.
    #[clap(long, env = "DISTRIBOARD_DATE_FORMAT", default_value = DEFAULT_DATE_FORMAT)]
    #[fieldx(get(clone))]
    #[garde(custom(Self::strftime("date", is_date_format)))]
    date_format: String,

    /// strftime format for movement timestamps.
    #[clap(long, env = "DISTRIBOARD_DATETIME_FORMAT", default_value = DEFAULT_DATETIME_FORMAT)]
    #[fieldx(get(clone))]
    #[garde(custom(Self::strftime("date-time", is_datetime_format)))]
    datetime_format: String,

    /// RFC 3339 timestamp used as "now" for recent movements and new customers.
    #[clap(long, env = "DISTRIBOARD_NOW")]
    #[garde(skip)]
    now: Option<DateTime<Utc>>,

    /// Silence the output
    #[clap(long, short, env = "DISTRIBOARD_QUIET", default_value_t = false)]
    #[garde(skip)]
    quiet: bool,

    /// File to send log into
    #[clap(long, env = "DISTRIBOARD_LOG_FILE")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn strftime<'a>(kind: &'static str, check: fn(&str) -> bool) -> impl FnOnce(&'a String, &()) -> garde::Result {
        move |value, _| {
            if check(value) {
                Ok(())
            }
            else {
                Err(garde::Error::new(format!("'{value}' is not a valid {kind} format")))
            }
        }
    }
}

#[derive(Debug)]
pub struct DashboardApp {
    cli:      Cli,
    reporter: Reporter,
}

impl DashboardApp {
    /// Builds the app from the process arguments and `DISTRIBOARD_*` environment variables.
    pub fn from_env() -> Result<Self, clap::Error> {
        Self::with_cli(Cli::try_parse()?)
    }

    pub fn from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        Self::with_cli(Cli::try_parse_from(args)?)
    }

    fn with_cli(cli: Cli) -> Result<Self, clap::Error> {
        if let Err(err) = cli.validate() {
            return Err(Cli::command().error(ErrorKind::InvalidValue, err));
        }

        Ok(Self {
            reporter: Reporter::new(cli.quiet()),
            cli,
        })
    }

    pub fn reporter(&self) -> &Reporter {
        &self.reporter
    }

    pub fn page(&self) -> Page {
        self.cli.page()
    }

    fn setup_tracing(&self) -> anyhow::Result<()> {
        use std::sync::Mutex;
        use tracing_subscriber::layer::SubscriberExt;
        use tracing_subscriber::util::SubscriberInitExt;

        let log_file = self.cli.log_file();

        let dest_writer = Mutex::new(if let Some(log_file) = &log_file {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(log_file)
                .with_context(|| format!("opening log file {}", log_file.display()))?;
            Box::new(file) as Box<dyn io::Write + Send>
        } else {
            Box::new(io::stderr()) as Box<dyn io::Write + Send>
        });

        let initialized = tracing_subscriber::registry()
            .with(tracing_subscriber::EnvFilter::from_default_env())
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(dest_writer)
                    .with_ansi(log_file.is_none()),
            )
            .try_init();

        match initialized {
            Ok(()) => info!("Tracing initialized"),
            // A subscriber installed earlier in the same process keeps receiving events.
            Err(err) => debug!("tracing setup skipped: {err}"),
        }

        Ok(())
    }

    fn localization(&self) -> Localization {
        Localization::default()
            .with_date_format(self.cli.date_format())
            .with_datetime_format(self.cli.datetime_format())
            .with_fold_accents(self.cli.fold_accents())
    }

    fn load_source(&self) -> anyhow::Result<Box<dyn DataSource>> {
        Ok(match self.cli.data() {
            Some(path) => Box::new(
                Dataset::from_json_file(&path).with_context(|| format!("loading dashboard data from {}", path.display()))?,
            ),
            None => Box::new(Dataset::sample()),
        })
    }

    /// Renders the selected page to stdout.
    pub fn execute(&self) -> anyhow::Result<()> {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        self.execute_into(&mut out)
    }

    #[instrument(level = "debug", skip(self, out), fields(page = %self.cli.page()))]
    pub fn execute_into<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        self.setup_tracing()?;

        let source = self.load_source()?;
        let loc = self.localization();
        let now = self.cli.now().unwrap_or_else(Utc::now);
        let ctx = SummaryContext {
            today: now.date_naive(),
        };
        debug!("rendering with now = {now}");

        match self.cli.page() {
            Page::Summary => self.show_summary(out, source.as_ref(), now, &loc),
            Page::Products => self.show_listing(out, source.products(), &ctx, &loc),
            Page::Employees => self.show_listing(out, source.employees(), &ctx, &loc),
            Page::Movements => self.show_listing(out, source.movements(), &ctx, &loc),
            Page::Customers => self.show_listing(out, source.customers(), &ctx, &loc),
            Page::Orders => self.show_listing(out, source.orders(), &ctx, &loc),
            Page::Audit => self.show_audit(out, source.as_ref()),
        }
    }

    fn heading<W: Write>(&self, out: &mut W, title: impl Display) -> io::Result<()> {
        writeln!(out, "{}", Style::new().bold().apply_to(title))
    }

    fn warn_unused_options(&self) {
        let page = self.cli.page();
        if self.cli.search().is_some() || self.cli.filter().is_some() {
            self.reporter
                .report_warn(format!("--search and --filter have no effect on the {page} page"));
        }
        if self.cli.export().is_some() {
            self.reporter
                .report_warn(format!("nothing to export from the {page} page"));
        }
    }

    fn show_summary<W: Write>(
        &self,
        out: &mut W,
        source: &dyn DataSource,
        now: DateTime<Utc>,
        loc: &Localization,
    ) -> anyhow::Result<()> {
        self.warn_unused_options();

        let stats = source.statistics(now);

        self.heading(out, "Panel de Control")?;
        writeln!(out, "{}", stats_table(stats.cards(loc)))?;

        if !stats.low_stock_products.is_empty() {
            writeln!(out)?;
            self.heading(out, "⚠️ Productos con Stock Bajo")?;
            let mut table = Table::new();
            table
                .load_preset(presets::ASCII_FULL_CONDENSED)
                .set_header(["ID", "Producto", "Stock", "Mínimo"]);
            for product in &stats.low_stock_products {
                table.add_row([
                    product.id.clone(),
                    product.name.clone(),
                    product.stock.to_string(),
                    product.min_stock.to_string(),
                ]);
            }
            for col in [2, 3] {
                if let Some(column) = table.column_mut(col) {
                    column.set_cell_alignment(CellAlignment::Right);
                }
            }
            writeln!(out, "{table}")?;
        }

        let mut latest: Vec<_> = source.movements().iter().collect();
        latest.sort_by(|a, b| b.date.cmp(&a.date));
        latest.truncate(LATEST_MOVEMENTS);

        if !latest.is_empty() {
            writeln!(out)?;
            self.heading(out, "🔄 Movimientos Recientes")?;
            let mut table = Table::new();
            table
                .load_preset(presets::ASCII_FULL_CONDENSED)
                .set_header(["Fecha", "Producto", "Tipo", "Cantidad", "Empleado"]);
            for movement in latest {
                table.add_row([
                    loc.datetime(&movement.date),
                    movement.product_name.clone(),
                    format!("{} {}", movement.icon(), loc.movement_kind(movement.kind)),
                    movement.signed_quantity(),
                    movement.employee_name.clone(),
                ]);
            }
            if let Some(column) = table.column_mut(3) {
                column.set_cell_alignment(CellAlignment::Right);
            }
            writeln!(out, "{table}")?;
        }

        Ok(())
    }

    fn query_for<R>(&self, loc: &Localization) -> anyhow::Result<Query<R::Facet>>
    where
        R: Searchable,
        R::Facet: FromStr,
    {
        let facet = match self.cli.filter() {
            Some(raw) => Selection::parse(R::FACET_NAME, &raw)?,
            None => Selection::All,
        };
        Ok(Query::new(
            loc.search_text(self.cli.search().unwrap_or_default()),
            facet,
        ))
    }

    fn show_listing<R, W>(
        &self,
        out: &mut W,
        records: &[R],
        ctx: &SummaryContext,
        loc: &Localization,
    ) -> anyhow::Result<()>
    where
        R: Searchable + Render + CsvExport + Summarize,
        R::Facet: FromStr + Display,
        W: Write,
    {
        let listing = Listing::new(records)
            .with_query(self.query_for::<R>(loc)?)
            .with_view_mode(self.cli.view());
        let shown = listing.filtered().len();

        self.heading(out, R::TITLE)?;
        writeln!(out, "{}", stats_table(listing.summarize(ctx, loc)))?;
        writeln!(
            out,
            "Mostrando {shown} de {} · {}: {}",
            records.len(),
            R::FACET_NAME,
            listing.query().facet()
        )?;
        writeln!(out, "{}", listing.render(self.cli.columns(), loc))?;

        if let Some(dir) = self.cli.export() {
            let path = self.export_listing(&listing, loc, &dir)?;
            self.reporter
                .report_info(format!("Exported {shown} records to {}", path.display()));
        }

        Ok(())
    }

    fn export_listing<R>(&self, listing: &Listing<'_, R>, loc: &Localization, dir: &Path) -> anyhow::Result<PathBuf>
    where
        R: Searchable + CsvExport,
    {
        listing
            .export_to_dir(loc, dir)
            .with_context(|| format!("exporting {} into {}", R::FILE_NAME, dir.display()))
    }

    fn show_audit<W: Write>(&self, out: &mut W, source: &dyn DataSource) -> anyhow::Result<()> {
        self.warn_unused_options();

        let found = audit(source);

        self.heading(out, "Auditoría de Referencias")?;
        if found.is_empty() {
            writeln!(out, "Sin discrepancias")?;
        } else {
            for discrepancy in &found {
                writeln!(out, "- {discrepancy}")?;
            }
            self.reporter
                .report_warn(format!("{} discrepancies found", found.len()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let app = DashboardApp::from_args(["distriboard"]).unwrap();
        assert_eq!(app.page(), Page::Summary);
        assert_eq!(app.cli.view(), ViewMode::Grid);
        assert_eq!(app.cli.columns(), DEFAULT_GRID_COLUMNS);
        assert_eq!(app.cli.date_format(), DEFAULT_DATE_FORMAT);
        assert_eq!(app.cli.datetime_format(), DEFAULT_DATETIME_FORMAT);
        assert!(!app.cli.fold_accents());
        assert_eq!(app.cli.search(), None);
    }

    #[test]
    fn test_page_and_options() {
        let app = DashboardApp::from_args([
            "distriboard",
            "orders",
            "-s",
            "mercado",
            "--filter",
            "completed",
            "--view",
            "list",
            "--now",
            "2024-12-05T12:00:00Z",
        ])
        .unwrap();
        assert_eq!(app.page(), Page::Orders);
        assert_eq!(app.cli.view(), ViewMode::List);
        assert_eq!(app.cli.search().as_deref(), Some("mercado"));
        assert_eq!(
            app.cli.now(),
            Some("2024-12-05T12:00:00Z".parse::<DateTime<Utc>>().unwrap())
        );
    }

    #[test]
    fn test_columns_are_validated() {
        let err = DashboardApp::from_args(["distriboard", "--columns", "0"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(DashboardApp::from_args(["distriboard", "--columns", "7"]).is_err());
        assert!(DashboardApp::from_args(["distriboard", "--columns", "6"]).is_ok());
    }

    #[test]
    fn test_date_format_is_validated() {
        let err = DashboardApp::from_args(["distriboard", "--date-format", "%Q-%"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(DashboardApp::from_args(["distriboard", "--date-format", "%Y-%m-%d"]).is_ok());
    }

    #[test]
    fn test_time_fields_rejected_in_date_format() {
        let err = DashboardApp::from_args(["distriboard", "customers", "--date-format", "%H:%M"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidValue);
        assert!(DashboardApp::from_args(["distriboard", "--date-format", "%d/%m/%Y %H:%M"]).is_err());

        // The same pattern is fine for timestamps.
        let app = DashboardApp::from_args(["distriboard", "--datetime-format", "%H:%M"]).unwrap();
        assert_eq!(app.cli.datetime_format(), "%H:%M");
        assert!(DashboardApp::from_args(["distriboard", "--datetime-format", "%Y-%Q"]).is_err());
    }

    #[test]
    fn test_unknown_page() {
        assert!(DashboardApp::from_args(["distriboard", "warehouse"]).is_err());
    }

    #[test]
    fn test_bad_filter_is_reported() {
        let app = DashboardApp::from_args(["distriboard", "customers", "--quiet", "--filter", "VIP"]).unwrap();
        let mut out = Vec::new();
        let err = app.execute_into(&mut out).unwrap_err();
        assert!(err.to_string().contains("VIP"));
    }
}

use crate::export::{ExportFormat, ReportKind};
use crate::models::YearMonth;
use clap::{Args, Parser, Subcommand};

/// Command-line interface definition for perfpay
/// Monthly performance reviews and payroll on a local SQLite store
#[derive(Parser)]
#[command(
    name = "perfpay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Performance reviews and payroll: self-assessment, leader approval, salary generation and bank exports",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Act as this user (employee number or id)
    #[arg(global = true, long = "as", value_name = "USER")]
    pub as_user: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        /// Print the current configuration file to stdout
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        /// Edit the configuration file with your preferred editor
        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/vim/notepad)"
        )]
        edit_config: bool,

        /// Specify the editor to use (overrides $EDITOR/$VISUAL).
        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,
        #[arg(long = "check", help = "Check database integrity")]
        check: bool,
        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,
        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
        #[arg(long = "limit", help = "Only the N most recent rows")]
        limit: Option<usize>,
    },

    /// Create a backup copy of the database
    Backup {
        #[arg(long, value_name = "FILE")]
        file: String,
        #[arg(long)]
        compress: bool,
        #[arg(long, short = 'f')]
        force: bool,
    },

    /// Show the profile of the current user
    Whoami,

    /// Employee administration (leader or finance)
    #[command(subcommand)]
    Employee(EmployeeCmd),

    /// Performance reviews
    #[command(subcommand)]
    Perf(PerfCmd),

    /// Salary generation and listing
    #[command(subcommand)]
    Salary(SalaryCmd),

    /// Export payroll reports (finance)
    Export {
        #[arg(long, value_enum, default_value = "summary")]
        kind: ReportKind,
        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,
        /// Payroll month (YYYY-MM), defaults to the current month
        #[arg(long)]
        month: Option<YearMonth>,
        #[arg(long, value_name = "FILE")]
        file: String,
        /// Only employees paid through this bank (bank report)
        #[arg(long)]
        bank: Option<String>,
        #[arg(long, short = 'f')]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum EmployeeCmd {
    /// List employees, optionally filtered by name, number or department
    List {
        #[arg(long, short)]
        search: Option<String>,
    },
    /// Add a new employee
    Add {
        #[arg(long = "no", value_name = "EMPLOYEE_NO")]
        employee_no: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Update fields of an existing employee
    Update {
        #[arg(long)]
        id: u32,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        /// Employment status: active | inactive
        #[arg(long)]
        status: Option<String>,
        #[command(flatten)]
        fields: EmployeeFields,
    },
    /// Delete an employee
    Del {
        #[arg(long)]
        id: u32,
    },
}

/// Optional fields shared by `employee add` and `employee update`.
#[derive(Args, Debug, Clone, Default)]
pub struct EmployeeFields {
    #[arg(long)]
    pub department: Option<String>,
    #[arg(long)]
    pub position: Option<String>,
    /// Entry date (YYYY-MM-DD)
    #[arg(long = "entry-date")]
    pub entry_date: Option<String>,
    /// employee | leader | finance
    #[arg(long)]
    pub role: Option<String>,
    /// Id of the direct leader
    #[arg(long)]
    pub leader: Option<u32>,
    #[arg(long = "id-card")]
    pub id_card: Option<String>,
    #[arg(long = "bank-account")]
    pub bank_account: Option<String>,
    #[arg(long = "bank-name")]
    pub bank_name: Option<String>,
    #[arg(long = "bank-branch")]
    pub bank_branch: Option<String>,
    #[arg(long = "branch-code")]
    pub bank_branch_code: Option<String>,
    #[arg(long = "base-salary")]
    pub base_salary: Option<i64>,
    #[arg(long = "performance-base")]
    pub performance_base: Option<i64>,
    /// standard | special
    #[arg(long = "tax-category")]
    pub tax_category: Option<String>,
}

#[derive(Subcommand)]
pub enum PerfCmd {
    /// Save or submit your own self-assessment
    #[command(name = "self")]
    SelfAssess {
        #[arg(long)]
        month: Option<YearMonth>,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        #[arg(long, default_value = "")]
        comment: String,
        /// Save without submitting
        #[arg(long)]
        draft: bool,
    },
    /// Complete a review as leader
    Assess {
        #[arg(long)]
        id: u32,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Stage a leader score without completing the review
    Stage {
        #[arg(long)]
        id: u32,
        #[arg(long, allow_negative_numbers = true)]
        score: i64,
        #[arg(long, default_value = "")]
        comment: String,
    },
    /// Approve pending reviews in bulk
    Batch {
        #[arg(long)]
        month: Option<YearMonth>,
        /// Record ids, comma separated; all pending reviews of the month when omitted
        #[arg(long, value_delimiter = ',')]
        ids: Vec<u32>,
        /// Comment for reviews without one (defaults to the configured comment)
        #[arg(long)]
        comment: Option<String>,
    },
    /// List reviews visible to you
    List {
        #[arg(long)]
        month: Option<YearMonth>,
        /// pending_self | pending_leader | completed
        #[arg(long)]
        status: Option<String>,
    },
    /// Show a single review
    Show {
        #[arg(long)]
        id: u32,
    },
    /// Review progress for a month
    Summary {
        #[arg(long)]
        month: Option<YearMonth>,
    },
}

#[derive(Subcommand)]
pub enum SalaryCmd {
    /// Create draft salary records from completed reviews (finance)
    Generate {
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// List salary records visible to you
    List {
        #[arg(long)]
        month: Option<YearMonth>,
    },
    /// Show the full breakdown of one salary record
    Show {
        /// Employee number or id; defaults to yourself
        #[arg(long)]
        employee: Option<String>,
        #[arg(long)]
        month: YearMonth,
    },
}

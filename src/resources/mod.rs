//! Catalogue of the backend collections a store can mirror.
//!
//! | Kind | Path | Cache key | Per page |
//! |------|------|-----------|----------|
//! | `users` | `/api/users` | `kavyaPharmMRs` | 10 |
//! | `products` | `/api/products` | `kavyaPharmProducts` | 10 |
//! | `targets` | `/api/targets` | `kavyaPharmAdminTargetsData` | 5 |
//! | `expenses` | `/api/expenses` | `kavyaPharmAdminExpensesData` | 10 |
//! | `notifications` | `/api/notifications` | `notifications` | 6 |
//! | `doctors` | `/api/doctors` | `kavyaPharmDoctorsData` | 10 |
//! | `tasks` | `/api/tasks` | `kavyaPharmTasks` | 5 |
//! | `dcrs` | `/api/dcrs` | `kavyaPharmRecentReports` | 4 |
//! | `distributions` | `/api/distributions` | `distributionHistory` | 10 |
//! | `mr-stock` | `/api/mr-stock` | `mrProductStock` | 10 |
//! | `stock-received` | `/api/stock-received` | `stockReceivedHistory` | 10 |
//! | `zones` | `/api/zones` | `zones` | 10 |
//! | `territories` | `/api/territories` | `territories` | 10 |
//! | `regions` | `/api/regions` | `regions` | 10 |
//!
//! `mr-stock` has no delete route and `stock-received` has no update
//! route; those calls fail with a status error and are applied locally.

mod seed;

use crate::normalize::{FieldMapping, FieldRule};
use crate::{Error, Result};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Static description of one REST collection.
#[derive(Debug, Clone, Copy)]
pub struct ResourceSpec {
    /// Short name used on the command line and in logs.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    /// Collection path relative to the API base.
    pub path: &'static str,
    /// Cache key for the mirrored item list.
    pub cache_key: &'static str,
    /// Default page size.
    pub items_per_page: usize,
    /// View fields matched by the search filter.
    pub search_fields: &'static [&'static str],
    /// View fields shown as table columns, after the id.
    pub columns: &'static [&'static str],
    /// Server-to-view field mapping.
    pub mapping: FieldMapping,
    /// Server-shaped records used when the cache is empty.
    pub seed: fn() -> Vec<Value>,
}

impl ResourceSpec {
    /// Joins the collection path onto an API base URL.
    #[must_use]
    pub fn endpoint(&self, api_base: &str) -> String {
        format!("{}{}", api_base.trim_end_matches('/'), self.path)
    }
}

/// The collections exposed by the field-force backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceKind {
    /// Admin, manager and MR accounts.
    Users,
    /// Product catalogue and stock.
    Products,
    /// Sales targets per MR.
    Targets,
    /// Expense claims.
    Expenses,
    /// Notifications.
    Notifications,
    /// Doctor directory.
    Doctors,
    /// Daily plan tasks.
    Tasks,
    /// Daily call reports (doctor visit reports).
    Dcrs,
    /// Sample handouts from managers to MRs and recipients.
    Distributions,
    /// Per-MR product stock, keyed by product code.
    MrStock,
    /// Stock received history.
    StockReceived,
    /// Sales zones.
    Zones,
    /// Territories within zones.
    Territories,
    /// Regions grouping zones.
    Regions,
}

impl ResourceKind {
    /// All resource kinds, in menu order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Users,
            Self::Products,
            Self::Targets,
            Self::Expenses,
            Self::Notifications,
            Self::Doctors,
            Self::Tasks,
            Self::Dcrs,
            Self::Distributions,
            Self::MrStock,
            Self::StockReceived,
            Self::Zones,
            Self::Territories,
            Self::Regions,
        ]
    }

    /// Returns the command-line name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.spec().name
    }

    /// Returns the static spec for this kind.
    #[must_use]
    pub fn spec(self) -> &'static ResourceSpec {
        match self {
            Self::Users => &USERS,
            Self::Products => &PRODUCTS,
            Self::Targets => &TARGETS,
            Self::Expenses => &EXPENSES,
            Self::Notifications => &NOTIFICATIONS,
            Self::Doctors => &DOCTORS,
            Self::Tasks => &TASKS,
            Self::Dcrs => &DCRS,
            Self::Distributions => &DISTRIBUTIONS,
            Self::MrStock => &MR_STOCK,
            Self::StockReceived => &STOCK_RECEIVED,
            Self::Zones => &ZONES,
            Self::Territories => &TERRITORIES,
            Self::Regions => &REGIONS,
        }
    }

    /// Parses a resource name, case-insensitively.
    ///
    /// Accepts a few aliases used by the dashboards (`mr`, `reports`,
    /// `visit-reports`, `stock`, `samples`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "users" | "user" | "mr" | "mrs" => Some(Self::Users),
            "products" | "product" | "stock" => Some(Self::Products),
            "targets" | "target" => Some(Self::Targets),
            "expenses" | "expense" => Some(Self::Expenses),
            "notifications" | "notification" => Some(Self::Notifications),
            "doctors" | "doctor" => Some(Self::Doctors),
            "tasks" | "task" | "dailyplan" => Some(Self::Tasks),
            "dcrs" | "dcr" | "reports" | "visit-reports" => Some(Self::Dcrs),
            "distributions" | "distribution" | "samples" => Some(Self::Distributions),
            "mr-stock" | "mrstock" => Some(Self::MrStock),
            "stock-received" | "received" => Some(Self::StockReceived),
            "zones" | "zone" => Some(Self::Zones),
            "territories" | "territory" => Some(Self::Territories),
            "regions" | "region" => Some(Self::Regions),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s).ok_or_else(|| {
            let known: Vec<&str> = Self::all().iter().map(|k| k.as_str()).collect();
            Error::InvalidInput(format!(
                "unknown resource '{s}' (expected one of: {})",
                known.join(", ")
            ))
        })
    }
}

/// User accounts.
pub static USERS: ResourceSpec = ResourceSpec {
    name: "users",
    label: "Users",
    path: "/api/users",
    cache_key: "kavyaPharmMRs",
    items_per_page: 10,
    search_fields: &["name", "email", "role"],
    columns: &["name", "email", "role", "territory", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name", "fullName"]),
        FieldRule::text("email", &["email"]),
        FieldRule::text("role", &["role"]),
        FieldRule::text("phone", &["phone"]),
        FieldRule::text("territory", &["territory"]),
        FieldRule::text("assignedManager", &["assignedManager"]),
        FieldRule::text("status", &["status"]).or("ACTIVE"),
    ]),
    seed: seed::users,
};

/// Product catalogue.
pub static PRODUCTS: ResourceSpec = ResourceSpec {
    name: "products",
    label: "Products",
    path: "/api/products",
    cache_key: "kavyaPharmProducts",
    items_per_page: 10,
    search_fields: &["name", "category"],
    columns: &["name", "category", "price", "stock"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::text("category", &["category"]),
        FieldRule::text("price", &["price"]),
        FieldRule::integer("stock", &["stock"]),
        FieldRule::text("description", &["description"]),
    ]),
    seed: seed::products,
};

/// Sales targets.
pub static TARGETS: ResourceSpec = ResourceSpec {
    name: "targets",
    label: "Targets",
    path: "/api/targets",
    cache_key: "kavyaPharmAdminTargetsData",
    items_per_page: 5,
    search_fields: &["mrName", "period"],
    columns: &[
        "mrName",
        "period",
        "salesTarget",
        "salesAchievement",
        "achievementPercentage",
        "status",
    ],
    mapping: FieldMapping::new(&[
        FieldRule::raw("mrId", &["mrId"]),
        FieldRule::text("mrName", &["mrName"]),
        FieldRule::text("period", &["productName", "period"]).or("Sales Target"),
        FieldRule::number("salesTarget", &["targetUnits", "salesTarget"]),
        FieldRule::number("salesAchievement", &["achievedUnits", "salesAchievement"]),
        FieldRule::integer("achievementPercentage", &["achievementPercentage"]),
        FieldRule::text("startDate", &["assignedDate", "startDate"]),
        FieldRule::text("endDate", &["endDate"]),
        FieldRule::text("status", &["progressStatus", "status"]).or("Pending"),
    ]),
    seed: seed::targets,
};

/// Expense claims.
pub static EXPENSES: ResourceSpec = ResourceSpec {
    name: "expenses",
    label: "Expenses",
    path: "/api/expenses",
    cache_key: "kavyaPharmAdminExpensesData",
    items_per_page: 10,
    search_fields: &["person", "type", "status"],
    columns: &["person", "type", "amount", "date", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("person", &["mrName"]),
        FieldRule::text("type", &["category"]),
        FieldRule::number("amount", &["amount"]),
        FieldRule::text("description", &["description"]),
        FieldRule::text("date", &["expenseDate", "submittedDate"]),
        FieldRule::text("status", &["status"]).or("PENDING"),
        FieldRule::raw("attachments", &["attachments"]),
    ]),
    seed: seed::expenses,
};

/// Notifications.
pub static NOTIFICATIONS: ResourceSpec = ResourceSpec {
    name: "notifications",
    label: "Notifications",
    path: "/api/notifications",
    cache_key: "notifications",
    items_per_page: 6,
    search_fields: &["title", "message"],
    columns: &["title", "type", "date", "priority", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("title", &["title"]),
        FieldRule::text("message", &["message"]),
        FieldRule::text("type", &["type"]).or("info"),
        FieldRule::text("date", &["date"]),
        FieldRule::text("status", &["status"]).or("unread"),
        FieldRule::text("priority", &["priority"]).or("normal"),
        FieldRule::raw("recipientId", &["recipientId"]),
        FieldRule::text("targetRole", &["targetRole"]),
    ]),
    seed: seed::notifications,
};

/// Doctor directory.
pub static DOCTORS: ResourceSpec = ResourceSpec {
    name: "doctors",
    label: "Doctors",
    path: "/api/doctors",
    cache_key: "kavyaPharmDoctorsData",
    items_per_page: 10,
    search_fields: &["name", "specialization", "clinic"],
    columns: &["name", "specialization", "clinic", "city", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::text("type", &["type"]),
        FieldRule::text("specialization", &["specialty", "specialization"]),
        FieldRule::text("phone", &["phone"]),
        FieldRule::text("email", &["email"]),
        FieldRule::text("clinic", &["clinicName", "clinic"]),
        FieldRule::text("city", &["city"]),
        FieldRule::text("assignedMR", &["assignedMR"]),
        FieldRule::text("status", &["status"]).or("ACTIVE"),
    ]),
    seed: seed::doctors,
};

/// Daily plan tasks.
pub static TASKS: ResourceSpec = ResourceSpec {
    name: "tasks",
    label: "Tasks",
    path: "/api/tasks",
    cache_key: "kavyaPharmTasks",
    items_per_page: 5,
    search_fields: &["title", "assignedTo"],
    columns: &["title", "type", "assignedTo", "dueDate", "priority", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("title", &["title"]),
        FieldRule::text("type", &["type"]),
        FieldRule::text("assignedTo", &["assignedTo"]),
        FieldRule::text("priority", &["priority"]).or("Medium"),
        FieldRule::text("status", &["status"]).or("Pending"),
        FieldRule::text("dueDate", &["dueDate"]),
        FieldRule::text("location", &["location"]),
        FieldRule::text("clinicName", &["clinicName"]),
        FieldRule::text("doctorName", &["doctorName"]),
    ]),
    seed: seed::tasks,
};

/// Daily call reports. The backend keys these by `reportId`.
pub static DCRS: ResourceSpec = ResourceSpec {
    name: "dcrs",
    label: "Visit reports",
    path: "/api/dcrs",
    cache_key: "kavyaPharmRecentReports",
    items_per_page: 4,
    search_fields: &["doctorName", "visitTitle"],
    columns: &["visitTitle", "doctorName", "visitType", "dateTime", "rating"],
    mapping: FieldMapping::new(&[
        FieldRule::text("mrName", &["mrName"]),
        FieldRule::text("visitTitle", &["visitTitle"]),
        FieldRule::text("visitType", &["visitType"]),
        FieldRule::text("doctorId", &["doctorId"]),
        FieldRule::text("doctorName", &["doctorName"]),
        FieldRule::text("clinicLocation", &["clinicLocation"]),
        FieldRule::text("dateTime", &["dateTime"]),
        FieldRule::text("rating", &["rating"]),
        FieldRule::text("remarks", &["remarks"]),
        FieldRule::raw("samplesGiven", &["samplesGiven"]),
    ])
    .with_id_field("reportId"),
    seed: seed::dcrs,
};

/// Sample distributions.
pub static DISTRIBUTIONS: ResourceSpec = ResourceSpec {
    name: "distributions",
    label: "Product distribution",
    path: "/api/distributions",
    cache_key: "distributionHistory",
    items_per_page: 10,
    search_fields: &["product", "mr", "recipient"],
    columns: &["date", "product", "mr", "quantity", "recipient", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("date", &["date"]),
        FieldRule::text("product", &["product"]),
        FieldRule::text("mr", &["mr"]),
        FieldRule::integer("quantity", &["quantity"]),
        FieldRule::text("recipient", &["recipient"]),
        FieldRule::text("notes", &["notes"]),
        FieldRule::text("status", &["status"]).or("completed"),
        FieldRule::text("userName", &["userName"]),
    ]),
    seed: seed::distributions,
};

/// MR product stock. The id is the product code.
pub static MR_STOCK: ResourceSpec = ResourceSpec {
    name: "mr-stock",
    label: "MR stock",
    path: "/api/mr-stock",
    cache_key: "mrProductStock",
    items_per_page: 10,
    search_fields: &["name"],
    columns: &["name", "stock"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::integer("stock", &["stock"]),
        FieldRule::text("userName", &["userName"]),
    ]),
    seed: seed::mr_stock,
};

/// Stock received entries.
pub static STOCK_RECEIVED: ResourceSpec = ResourceSpec {
    name: "stock-received",
    label: "Stock received",
    path: "/api/stock-received",
    cache_key: "stockReceivedHistory",
    items_per_page: 10,
    search_fields: &["productId", "notes"],
    columns: &["productId", "quantity", "date", "notes"],
    mapping: FieldMapping::new(&[
        FieldRule::text("productId", &["productId"]),
        FieldRule::integer("quantity", &["quantity"]),
        FieldRule::text("date", &["date"]),
        FieldRule::text("notes", &["notes"]),
        FieldRule::text("userName", &["userName"]),
    ]),
    seed: seed::stock_received,
};

/// Sales zones.
pub static ZONES: ResourceSpec = ResourceSpec {
    name: "zones",
    label: "Zones",
    path: "/api/zones",
    cache_key: "zones",
    items_per_page: 10,
    search_fields: &["name", "manager"],
    columns: &["name", "manager", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::text("description", &["description"]),
        FieldRule::text("manager", &["manager"]),
        FieldRule::text("status", &["status"]).or("Active"),
    ]),
    seed: seed::zones,
};

/// Territories.
pub static TERRITORIES: ResourceSpec = ResourceSpec {
    name: "territories",
    label: "Territories",
    path: "/api/territories",
    cache_key: "territories",
    items_per_page: 10,
    search_fields: &["name", "zone", "manager"],
    columns: &["name", "zone", "manager", "mrCount", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::text("zone", &["zone"]),
        FieldRule::text("manager", &["manager"]),
        FieldRule::integer("mrCount", &["mrCount"]),
        FieldRule::text("status", &["status"]).or("Active"),
        FieldRule::text("description", &["description"]),
    ]),
    seed: seed::territories,
};

/// Regions.
pub static REGIONS: ResourceSpec = ResourceSpec {
    name: "regions",
    label: "Regions",
    path: "/api/regions",
    cache_key: "regions",
    items_per_page: 10,
    search_fields: &["name"],
    columns: &["name", "description", "status"],
    mapping: FieldMapping::new(&[
        FieldRule::text("name", &["name"]),
        FieldRule::text("description", &["description"]),
        FieldRule::text("status", &["status"]).or("Active"),
    ]),
    seed: seed::regions,
};

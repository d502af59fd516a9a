use chrono::NaiveDate;
use serde::Serialize;

pub const HEADER: [&str; 9] = [
    "TRANS_ID",
    "CUST_ID",
    "CUST_NAME",
    "PROD_ID",
    "PROD_NAME",
    "CATEGORY",
    "PRICE",
    "QUANTITY",
    "TXN_DATE",
];

pub const CATALOG: [(&str, [&str; 4]); 5] = [
    (
        "Electronics",
        ["Wireless Mouse", "Gaming Monitor", "USB-C Cable", "Mechanical Keyboard"],
    ),
    ("Home", ["Blender", "Desk Lamp", "Throw Pillow", "Picture Frame"]),
    ("Office", ["Stapler", "Whiteboard", "Ballpoint Pens", "File Organizer"]),
    (
        "Books",
        ["Python 101", "History of Rome", "Cooking for Beginners", "Sci-Fi Novel"],
    ),
    ("Garden", ["Shovel", "Plant Pot", "Garden Hose", "Rake"]),
];

/// Product name used when the category was blanked out.
pub const UNCATEGORIZED_PRODUCT: &str = "Generic Item";

/// One row of the sales extract, in header column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct SalesRecord {
    pub trans_id: u64,
    pub cust_id: String,
    pub cust_name: String,
    pub prod_id: String,
    pub prod_name: String,
    /// `None` is written as an empty field.
    pub category: Option<String>,
    pub price: f64,
    pub quantity: u32,
    pub txn_date: NaiveDate,
}

//! HTML dashboard rendering
//!
//! Pure string construction from fully-resolved rankings; nothing here
//! touches the network or the HTTP layer.

mod format;

pub use format::{
    escape_html, format_change, format_price, format_rank, format_usd_grouped, group_thousands,
    truncate_name, NAME_MAX_CHARS, NOT_AVAILABLE,
};

use crate::market::{AssetSnapshot, ChangeWindow};
use crate::ranking::Rankings;
use chrono::{DateTime, Utc};

/// Document title and page heading
pub const DASHBOARD_TITLE: &str = "Crypto Tracker";

const STYLE: &str = r#"
      body {
        font-family: Arial, sans-serif;
        display: flex;
        flex-direction: column;
        align-items: center;
        padding: 20px;
        overflow-x: auto;
      }
      .container {
        display: flex;
        gap: 10px;
      }
      .column {
        display: flex;
        flex-direction: column;
        gap: 10px;
      }
      table {
        width: 400px;
        text-align: center;
        border-collapse: collapse;
        font-size: 12px;
      }
      th, td {
        padding: 4px;
        text-overflow: ellipsis;
        white-space: nowrap;
        overflow: hidden;
      }
      th {
        font-size: 14px;
      }
      h3 {
        text-align: center;
        font-size: 16px;
      }
      footer {
        font-size: 11px;
        color: #666;
        margin-top: 10px;
      }
"#;

const COLUMNS: [&str; 7] = [
    "Rank",
    "Name",
    "Symbol",
    "Price",
    "% Change",
    "Market Cap",
    "FDV",
];

/// Everything the dashboard page shows
#[derive(Debug, Clone)]
pub struct Dashboard {
    /// Gainers and losers for each window
    pub rankings: Rankings,
    /// When the underlying data was fetched
    pub generated_at: DateTime<Utc>,
}

impl Dashboard {
    pub fn new(rankings: Rankings, generated_at: DateTime<Utc>) -> Self {
        Self {
            rankings,
            generated_at,
        }
    }
}

/// Render one table row
fn render_row(asset: &AssetSnapshot, window: ChangeWindow) -> String {
    let cells = [
        format_rank(asset.market_cap_rank),
        escape_html(&truncate_name(&asset.name)),
        escape_html(&asset.symbol.to_uppercase()),
        format_price(asset.current_price),
        format_change(asset.change(window)),
        format_usd_grouped(asset.market_cap),
        format_usd_grouped(asset.fully_diluted_valuation),
    ];

    let mut row = String::from("          <tr>\n");
    for cell in cells {
        row.push_str(&format!("            <td>{cell}</td>\n"));
    }
    row.push_str("          </tr>\n");
    row
}

/// Render a titled table of assets for one window
pub fn render_table(title: &str, assets: &[AssetSnapshot], window: ChangeWindow) -> String {
    let mut table = format!(
        "        <h3>{}</h3>\n        <table border=\"1\">\n          <tr>\n",
        escape_html(title)
    );
    for column in COLUMNS {
        table.push_str(&format!("            <th>{column}</th>\n"));
    }
    table.push_str("          </tr>\n");
    for asset in assets {
        table.push_str(&render_row(asset, window));
    }
    table.push_str("        </table>\n");
    table
}

/// Render the full dashboard document
///
/// One column per window, each holding a gainers table above a losers table.
pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let mut columns = String::new();
    for movers in dashboard.rankings.iter() {
        let label = movers.window.label();
        columns.push_str("      <div class=\"column\">\n");
        columns.push_str(&render_table(
            &format!("Top {label} Gainers"),
            &movers.gainers,
            movers.window,
        ));
        columns.push_str(&render_table(
            &format!("Top {label} Losers"),
            &movers.losers,
            movers.window,
        ));
        columns.push_str("      </div>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    \
         <title>{title}</title>\n    <style>{STYLE}    </style>\n  </head>\n  <body>\n    \
         <h1>{title}</h1>\n    <div class=\"container\">\n{columns}    </div>\n    \
         <footer>Generated at {generated}</footer>\n  </body>\n</html>\n",
        title = DASHBOARD_TITLE,
        generated = dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
    )
}

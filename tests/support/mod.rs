#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use serde_json::Value;
use vtu_results::{ResultError, ResultSource};

pub const INDEX_URL: &str = "https://results.vtu.ac.in/DJcbcs25/index.php";

/// In-process stand-in for the result service. Unknown identifiers answer 503.
#[derive(Default)]
pub struct FakeService {
    pub pages: HashMap<String, Value>,
    pub calls: AtomicUsize,
}

impl FakeService {
    pub fn with(mut self, identifier: &str, payload: Value) -> Self {
        self.pages.insert(identifier.to_string(), payload);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ResultSource for FakeService {
    async fn fetch_raw(&self, identifier: &str, source_url: &str) -> Result<Value, ResultError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(source_url, INDEX_URL);
        // Later identifiers answer first, so completion order differs from dispatch order.
        let delay = 30u64.saturating_sub(identifier.bytes().map(u64::from).sum::<u64>() % 30);
        tokio::time::sleep(Duration::from_millis(delay)).await;
        match self.pages.get(identifier) {
            Some(payload) => Ok(payload.clone()),
            None => Err(ResultError::Status(503, "Service Unavailable".to_string())),
        }
    }
}

pub fn result_page(seat: &str, rows: &[[&str; 7]]) -> String {
    let mut cells = String::new();
    for row in rows {
        cells.push_str("<div class=\"divTableRow\">");
        for cell in row {
            cells.push_str(&format!("<div class=\"divTableCell\">{}</div>", cell));
        }
        cells.push_str("</div>\n");
    }
    format!(
        r#"<html><body>
<table>
<tr><td><b>University Seat Number</b></td><td><b>: </b>{seat}</td></tr>
<tr><td><b>Student Name</b></td><td><b>: </b>RAHUL K</td></tr>
</table>
<div><b>Semester : 5</b></div>
<div class="divTable"><div class="divTableBody">
<div class="divTableRow"><div class="divTableCell">Subject Code</div><div class="divTableCell">Subject Name</div><div class="divTableCell">Internal Marks</div><div class="divTableCell">External Marks</div><div class="divTableCell">Total</div><div class="divTableCell">Result</div><div class="divTableCell">Announced / Updated on</div></div>
{cells}</div></div>
</body></html>"#
    )
}

pub fn management_page(seat: &str) -> String {
    result_page(seat, &[["18CS51", "Management", "20", "58", "78", "P", "2024-02-10"]])
}

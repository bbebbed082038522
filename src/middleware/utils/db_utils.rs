use core::fmt;

pub struct Pagination {
    pub order_dir: Option<QryOrder>,
    pub count: i64,
    pub start: i64,
}

impl Pagination {
    pub fn new(count: Option<i64>, start: Option<i64>) -> Self {
        let count = count.unwrap_or(10).clamp(1, 100);
        let start = start.unwrap_or(0).max(0);
        Self {
            order_dir: None,
            count,
            start,
        }
    }
}

#[derive(Debug)]
pub enum QryOrder {
    DESC,
    ASC,
}

impl fmt::Display for QryOrder {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            QryOrder::DESC => write!(f, "DESC"),
            QryOrder::ASC => write!(f, "ASC"),
        }
    }
}

pub trait ViewFieldSelector {
    // select query fields to fill the View object
    fn get_select_query_fields() -> String;
}

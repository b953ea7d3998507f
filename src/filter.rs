//! Typed filter predicates and their lowering to parameterized SQL.
//!
//! Filters are built as a small predicate tree instead of string
//! concatenation so that handlers cannot construct invalid or unescaped
//! queries. The tree is lowered to a `WHERE` clause with `?N` placeholders
//! and a matching parameter list.

use rusqlite::types::Value;

use crate::month::Month;

/// A filter over transactions, expressed as a tree of typed comparisons.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// The transaction's month of sale (any year) equals the given month.
    MonthOfSale(Month),
    /// The title contains the given text, ignoring case.
    TitleContains(String),
    /// The description contains the given text, ignoring case.
    DescriptionContains(String),
    /// The price equals the given value exactly.
    PriceEquals(f64),
    /// The price is greater than or equal to the given value.
    PriceAtLeast(f64),
    /// The price is less than or equal to the given value.
    PriceAtMost(f64),
    /// The sold flag equals the given value.
    Sold(bool),
    /// Matches no transaction.
    ///
    /// Stands in for comparison branches that cannot match, e.g. a price
    /// equality for a search term that is not a number. Keeping the branch
    /// in the tree preserves the arity of the enclosing `Any`.
    Never,
    /// All of the child predicates hold. An empty list matches everything.
    All(Vec<Predicate>),
    /// At least one of the child predicates holds. An empty list matches
    /// nothing.
    Any(Vec<Predicate>),
}

impl Predicate {
    /// Lower the predicate to an SQL condition, appending its parameters to
    /// `parameters`.
    ///
    /// Placeholders are numbered from the current length of `parameters`,
    /// so a caller can lower several predicates into one statement.
    pub fn to_sql(&self, parameters: &mut Vec<Value>) -> String {
        match self {
            Predicate::MonthOfSale(month) => {
                parameters.push(Value::Integer(month.number() as i64));
                format!(
                    "CAST(strftime('%m', date_of_sale) AS INTEGER) = ?{}",
                    parameters.len()
                )
            }
            Predicate::TitleContains(text) => {
                parameters.push(Value::Text(text.to_lowercase()));
                format!("instr(lower(title), ?{}) > 0", parameters.len())
            }
            Predicate::DescriptionContains(text) => {
                parameters.push(Value::Text(text.to_lowercase()));
                format!("instr(lower(description), ?{}) > 0", parameters.len())
            }
            Predicate::PriceEquals(price) => {
                parameters.push(Value::Real(*price));
                format!("price = ?{}", parameters.len())
            }
            Predicate::PriceAtLeast(price) => {
                parameters.push(Value::Real(*price));
                format!("price >= ?{}", parameters.len())
            }
            Predicate::PriceAtMost(price) => {
                parameters.push(Value::Real(*price));
                format!("price <= ?{}", parameters.len())
            }
            Predicate::Sold(sold) => {
                parameters.push(Value::Integer(*sold as i64));
                format!("sold = ?{}", parameters.len())
            }
            Predicate::Never => "0 = 1".to_string(),
            Predicate::All(children) => {
                if children.is_empty() {
                    return "1 = 1".to_string();
                }

                let clauses: Vec<String> = children
                    .iter()
                    .map(|child| child.to_sql(parameters))
                    .collect();
                format!("({})", clauses.join(" AND "))
            }
            Predicate::Any(children) => {
                if children.is_empty() {
                    return "0 = 1".to_string();
                }

                let clauses: Vec<String> = children
                    .iter()
                    .map(|child| child.to_sql(parameters))
                    .collect();
                format!("({})", clauses.join(" OR "))
            }
        }
    }

    /// The predicate AND-ed with `other`.
    pub fn and(self, other: Predicate) -> Predicate {
        Predicate::All(vec![self, other])
    }
}

/// The filter derived from a listing request: a month plus optional search
/// text.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionFilter {
    /// The month of sale to select.
    pub month: Month,
    /// Search text matched against the title, description, and price.
    /// An empty string disables the search branch entirely.
    pub search: String,
}

impl TransactionFilter {
    /// Build the predicate tree for the filter.
    ///
    /// The search text matches when it is a case-insensitive substring of
    /// the title or description, or when it parses as a number equal to the
    /// price. A non-numeric search keeps an always-false price branch so
    /// the OR always has three arms, matching the original service's null
    /// sentinel.
    pub fn predicate(&self) -> Predicate {
        let month = Predicate::MonthOfSale(self.month);

        if self.search.is_empty() {
            return month;
        }

        let price_branch = match self.search.trim().parse::<f64>() {
            Ok(price) => Predicate::PriceEquals(price),
            Err(_) => Predicate::Never,
        };

        month.and(Predicate::Any(vec![
            Predicate::TitleContains(self.search.clone()),
            Predicate::DescriptionContains(self.search.clone()),
            price_branch,
        ]))
    }
}

/// One of the ten fixed price ranges used by the histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBucket {
    /// Inclusive lower bound.
    pub min: f64,
    /// Inclusive upper bound, or `None` for the open-ended top bucket.
    pub max: Option<f64>,
    /// The label used as the response key, e.g. `"101-200"`.
    pub label: &'static str,
}

impl PriceBucket {
    /// The predicate selecting transactions that fall in this bucket.
    pub fn predicate(&self) -> Predicate {
        match self.max {
            Some(max) => Predicate::All(vec![
                Predicate::PriceAtLeast(self.min),
                Predicate::PriceAtMost(max),
            ]),
            None => Predicate::PriceAtLeast(self.min),
        }
    }
}

/// The ten histogram buckets: contiguous ranges of width 100 from 0 to 900,
/// then everything from 901 up.
pub const PRICE_BUCKETS: [PriceBucket; 10] = [
    PriceBucket {
        min: 0.0,
        max: Some(100.0),
        label: "0-100",
    },
    PriceBucket {
        min: 101.0,
        max: Some(200.0),
        label: "101-200",
    },
    PriceBucket {
        min: 201.0,
        max: Some(300.0),
        label: "201-300",
    },
    PriceBucket {
        min: 301.0,
        max: Some(400.0),
        label: "301-400",
    },
    PriceBucket {
        min: 401.0,
        max: Some(500.0),
        label: "401-500",
    },
    PriceBucket {
        min: 501.0,
        max: Some(600.0),
        label: "501-600",
    },
    PriceBucket {
        min: 601.0,
        max: Some(700.0),
        label: "601-700",
    },
    PriceBucket {
        min: 701.0,
        max: Some(800.0),
        label: "701-800",
    },
    PriceBucket {
        min: 801.0,
        max: Some(900.0),
        label: "801-900",
    },
    PriceBucket {
        min: 901.0,
        max: None,
        label: "901-above",
    },
];

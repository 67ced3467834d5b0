#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCategory {
    ToDo,
    InProgress,
    Done,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ToDo => "TO_DO",
            Self::InProgress => "IN_PROGRESS",
            Self::Done => "DONE",
        }
    }
}

/// What a task is about. The store keeps this as three nullable foreign-key
/// columns (order_id, product_id, customer_id); the write path only ever sets
/// one of them, so the columns are mutually exclusive in practice. Report
/// queries read the columns directly in SQL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSubject {
    Order(i64),
    Product(i64),
    Customer(i64),
    None,
}

impl TaskSubject {
    /// Split into (order_id, product_id, customer_id) column values.
    pub fn to_columns(self) -> (Option<i64>, Option<i64>, Option<i64>) {
        match self {
            Self::Order(id) => (Some(id), None, None),
            Self::Product(id) => (None, Some(id), None),
            Self::Customer(id) => (None, None, Some(id)),
            Self::None => (None, None, None),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: i64,
    pub description: Option<String>,
    pub subject: TaskSubject,
}

/// One status record for a task. A task may accumulate several of these over
/// time; reports count every row, not just the latest.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskStatus {
    pub id: i64,
    pub name: Option<String>,
    pub task_id: i64,
    pub status_category: StatusCategory,
}

use rusqlite::Connection;
use tempfile::TempDir;

use orderdesk::db::{
    connection, customer_repo, migrations, order_repo, product_repo, seed, task_repo,
};
use orderdesk::error::ErrorCode;
use orderdesk::models::{StatusCategory, TaskSubject};
use orderdesk::services::reports::{self, CustomerReportParams};

// ─── helpers ───────────────────────────────────────────────────────

struct TestDb {
    conn: Connection,
}

impl TestDb {
    fn new() -> Self {
        let conn = Connection::open_in_memory().expect("open in-memory db");
        conn.execute_batch("PRAGMA foreign_keys=ON;").expect("pragma");
        migrations::run_migrations(&conn).expect("migrations");
        Self { conn }
    }

    fn customer(&self, name: &str) -> i64 {
        customer_repo::create_customer(&self.conn, name)
            .expect("create customer")
            .id
    }

    fn product(&self, name: Option<&str>, sku: Option<&str>, price: Option<f64>) -> i64 {
        product_repo::insert_product(&self.conn, name, sku, price)
            .expect("create product")
            .id
    }

    fn order(&self, customer_id: i64) -> i64 {
        order_repo::create_order(&self.conn, customer_id, false)
            .expect("create order")
            .id
    }

    fn item(&self, order_id: i64, product_id: i64, quantity: i64) {
        order_repo::create_order_item(&self.conn, order_id, product_id, quantity)
            .expect("create order item");
    }

    fn task(&self, subject: TaskSubject) -> i64 {
        task_repo::create_task(&self.conn, None, subject)
            .expect("create task")
            .id
    }

    fn status(&self, task_id: i64, category: StatusCategory) {
        task_repo::create_task_status(&self.conn, None, task_id, category)
            .expect("create task status");
    }
}

fn params(page: Option<&str>, name: Option<&str>, has_open_tasks: bool) -> CustomerReportParams {
    CustomerReportParams {
        page: page.map(str::to_string),
        name: name.map(str::to_string),
        has_open_tasks: has_open_tasks.then(String::new),
    }
}

// ─── blocked assets ────────────────────────────────────────────────

#[test]
fn blocked_assets_empty_store() {
    let db = TestDb::new();
    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 0);
    assert_eq!(report.blocked_assets_total_price, 0.0);
}

#[test]
fn blocked_assets_sums_items_of_open_order() {
    let db = TestDb::new();
    let customer = db.customer("Henry Wallis");
    let banana = db.product(Some("banana"), Some("kg"), Some(10.99));
    let mango = db.product(Some("mango"), Some("kg"), Some(9.99));
    let order = db.order(customer);
    db.item(order, banana, 8);
    db.item(order, mango, 3);
    let task = db.task(TaskSubject::Order(order));
    db.status(task, StatusCategory::ToDo);

    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 11);
    assert!((report.blocked_assets_total_price - 117.89).abs() < 1e-9);
}

#[test]
fn in_progress_status_also_blocks() {
    let db = TestDb::new();
    let customer = db.customer("Henry Wallis");
    let product = db.product(Some("lemon"), Some("kg"), Some(2.99));
    let order = db.order(customer);
    db.item(order, product, 4);
    let task = db.task(TaskSubject::Order(order));
    db.status(task, StatusCategory::InProgress);

    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 4);
}

#[test]
fn done_task_does_not_block() {
    let db = TestDb::new();
    let customer = db.customer("Henry Wallis");
    let product = db.product(Some("lemon"), Some("kg"), Some(2.99));
    let order = db.order(customer);
    db.item(order, product, 4);
    let task = db.task(TaskSubject::Order(order));
    db.status(task, StatusCategory::Done);

    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 0);
    assert_eq!(report.blocked_assets_total_price, 0.0);
}

#[test]
fn customer_and_product_tasks_do_not_block_orders() {
    let db = TestDb::new();
    let customer = db.customer("Henry Wallis");
    let product = db.product(None, Some("kg"), Some(2.99));
    let order = db.order(customer);
    db.item(order, product, 4);
    // Open tasks exist, but none references the order.
    let customer_task = db.task(TaskSubject::Customer(customer));
    db.status(customer_task, StatusCategory::ToDo);
    let product_task = db.task(TaskSubject::Product(product));
    db.status(product_task, StatusCategory::InProgress);

    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 0);
}

#[test]
fn null_price_counts_quantity_but_not_price() {
    let db = TestDb::new();
    let customer = db.customer("Henry Wallis");
    let unpriced = db.product(Some("mystery"), Some("kg"), None);
    let priced = db.product(Some("lemon"), Some("kg"), Some(2.0));
    let order = db.order(customer);
    db.item(order, unpriced, 5);
    db.item(order, priced, 2);
    let task = db.task(TaskSubject::Order(order));
    db.status(task, StatusCategory::ToDo);

    let report = reports::blocked_assets(&db.conn).expect("report");
    assert_eq!(report.blocked_assets_total_quantity, 7);
    assert!((report.blocked_assets_total_price - 4.0).abs() < 1e-9);
}

// ─── product report ────────────────────────────────────────────────

#[test]
fn product_report_empty_store() {
    let db = TestDb::new();
    let report = reports::product_report(&db.conn).expect("report");
    assert_eq!(report.total_products, 0);
    assert_eq!(report.invalid_products, 0);
}

#[test]
fn product_report_counts_each_invalid_product_once() {
    let db = TestDb::new();
    db.product(Some("banana"), Some("kg"), Some(10.99));
    db.product(Some("mango"), Some("kg"), Some(9.99));
    db.product(None, Some("kg"), Some(1.0)); // missing name
    db.product(Some("lemon"), None, Some(1.0)); // missing sku
    db.product(Some("grape"), Some("kg"), None); // missing price
    db.product(None, None, None); // missing everything, still one product

    let report = reports::product_report(&db.conn).expect("report");
    assert_eq!(report.total_products, 6);
    assert_eq!(report.invalid_products, 4);
}

// ─── customer report ───────────────────────────────────────────────

#[test]
fn customer_report_pages_of_ten_by_id() {
    let db = TestDb::new();
    for i in 1..=12 {
        db.customer(&format!("Customer {i:02}"));
    }

    let page_1 = reports::customer_report(&db.conn, &params(Some("1"), None, false))
        .expect("page 1")
        .results;
    assert_eq!(page_1.len(), 10);
    assert_eq!(page_1[0].name, "Customer 01");
    assert_eq!(page_1[9].name, "Customer 10");

    let page_2 = reports::customer_report(&db.conn, &params(Some("2"), None, false))
        .expect("page 2")
        .results;
    assert_eq!(page_2.len(), 2);
    assert_eq!(page_2[0].name, "Customer 11");

    // No page parameter starts from the first customer.
    let default = reports::customer_report(&db.conn, &params(None, None, false))
        .expect("default page")
        .results;
    assert_eq!(default.len(), 10);
    assert_eq!(default[0].name, "Customer 01");
}

#[test]
fn customer_report_name_filter_is_case_insensitive() {
    let db = TestDb::new();
    db.customer("Donald Boyle");
    db.customer("Henry Wallis");
    db.customer("Andrew Owen");

    let results = reports::customer_report(&db.conn, &params(None, Some("boyle"), false))
        .expect("report")
        .results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Donald Boyle");
}

#[test]
fn customer_report_name_filter_matches_wildcards_literally() {
    let db = TestDb::new();
    db.customer("Acme 50% Corp");
    db.customer("Acme 50x Corp");
    db.customer("Acme_Corp");
    db.customer("AcmexCorp");

    let results = reports::customer_report(&db.conn, &params(None, Some("50%"), false))
        .expect("report")
        .results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Acme 50% Corp");

    let results = reports::customer_report(&db.conn, &params(None, Some("Acme_"), false))
        .expect("report")
        .results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Acme_Corp");
}

#[test]
fn customer_report_counts_every_status_row() {
    let db = TestDb::new();
    let customer = db.customer("Donald Boyle");
    let product = db.product(Some("banana"), Some("kg"), Some(10.99));

    // Direct customer task with a status history: two TO_DO rows and a DONE.
    let direct = db.task(TaskSubject::Customer(customer));
    db.status(direct, StatusCategory::ToDo);
    db.status(direct, StatusCategory::ToDo);
    db.status(direct, StatusCategory::Done);

    // Task attached through one of the customer's orders.
    let order = db.order(customer);
    db.item(order, product, 1);
    let via_order = db.task(TaskSubject::Order(order));
    db.status(via_order, StatusCategory::InProgress);

    let results = reports::customer_report(&db.conn, &params(None, None, false))
        .expect("report")
        .results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].todo, 2);
    assert_eq!(results[0].in_progress, 1);
    assert_eq!(results[0].done, 1);
}

#[test]
fn has_open_tasks_drops_customers_without_open_rows() {
    let db = TestDb::new();
    let open = db.customer("Open Customer");
    let closed = db.customer("Closed Customer");
    db.customer("Idle Customer");

    let open_task = db.task(TaskSubject::Customer(open));
    db.status(open_task, StatusCategory::ToDo);
    let closed_task = db.task(TaskSubject::Customer(closed));
    db.status(closed_task, StatusCategory::Done);

    let results = reports::customer_report(&db.conn, &params(None, None, true))
        .expect("report")
        .results;
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Open Customer");
}

#[test]
fn unparseable_page_is_a_bad_request() {
    let db = TestDb::new();
    let err = reports::customer_report(&db.conn, &params(Some("two"), None, false)).unwrap_err();
    assert_eq!(err.code, ErrorCode::BadRequest);
    assert_eq!(err.message, "Invalid request data");
}

// ─── seed dataset ──────────────────────────────────────────────────

#[test]
fn seeded_dataset_reports() {
    let mut conn = Connection::open_in_memory().expect("open in-memory db");
    conn.execute_batch("PRAGMA foreign_keys=ON;").expect("pragma");
    migrations::run_migrations(&conn).expect("migrations");
    seed::seed(&mut conn).expect("seed");

    let blocked = reports::blocked_assets(&conn).expect("blocked assets");
    assert_eq!(blocked.blocked_assets_total_quantity, 11);
    assert!((blocked.blocked_assets_total_price - 117.89).abs() < 1e-9);

    let products = reports::product_report(&conn).expect("product report");
    assert_eq!(products.total_products, 4);
    assert_eq!(products.invalid_products, 0);

    let customers = reports::customer_report(&conn, &params(None, None, false))
        .expect("customer report")
        .results;
    assert_eq!(customers.len(), 3);
    // Donald carries the in-progress customer task, Henry the open order task.
    assert_eq!(customers[0].in_progress, 1);
    assert_eq!(customers[1].todo, 1);
    assert_eq!(customers[2].todo + customers[2].in_progress + customers[2].done, 0);

    let with_open = reports::customer_report(&conn, &params(None, None, true))
        .expect("filtered report")
        .results;
    assert_eq!(with_open.len(), 2);
}

// ─── database bootstrap ────────────────────────────────────────────

#[test]
fn init_creates_tables_and_open_reuses_them() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("orderdesk.db");

    let conn = connection::init_db(&path).expect("init");
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table'
             AND name IN ('customers', 'products', 'orders', 'order_items', 'tasks', 'task_status')",
            [],
            |row| row.get(0),
        )
        .expect("count tables");
    assert_eq!(tables, 6);
    drop(conn);

    connection::open_db(&path).expect("reopen");
}

#[test]
fn open_without_init_fails() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("missing.db");
    assert!(connection::open_db(&path).is_err());
}

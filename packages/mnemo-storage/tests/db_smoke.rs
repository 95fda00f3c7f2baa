use time::OffsetDateTime;
use uuid::Uuid;

use mnemo_config::Postgres;
use mnemo_storage::{db::Db, models::KnowledgeItem, queries};
use mnemo_testkit::TestDatabase;

async fn bootstrapped_db(test_db: &TestDatabase) -> Db {
	let cfg = Postgres { dsn: test_db.dsn().to_string(), pool_max_conns: 2 };
	let db = Db::connect(&cfg).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	db
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MNEMO_PG_DSN to run."]
async fn db_connects_and_bootstraps() {
	let Some(base_dsn) = mnemo_testkit::env_dsn() else {
		eprintln!("Skipping db_connects_and_bootstraps; set MNEMO_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped_db(&test_db).await;

	// Bootstrap must be idempotent.
	db.ensure_schema().await.expect("Failed to re-run schema bootstrap.");

	for table in ["knowledge_items", "search_queries", "search_results"] {
		let count: i64 = sqlx::query_scalar(
			"SELECT count(*) FROM information_schema.tables WHERE table_name = $1",
		)
		.bind(table)
		.fetch_one(&db.pool)
		.await
		.expect("Failed to query schema tables.");

		assert_eq!(count, 1, "missing table {table}");
	}

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MNEMO_PG_DSN to run."]
async fn full_text_lookup_is_owner_scoped() {
	let Some(base_dsn) = mnemo_testkit::env_dsn() else {
		eprintln!("Skipping full_text_lookup_is_owner_scoped; set MNEMO_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped_db(&test_db).await;
	let now = OffsetDateTime::now_utc();

	for (owner, title) in [("alice", "Marketing deck"), ("bob", "Marketing retro")] {
		let item = KnowledgeItem {
			item_id: Uuid::new_v4(),
			owner_id: owner.to_string(),
			title: title.to_string(),
			content: "notes about the marketing presentation".to_string(),
			content_type: "text".to_string(),
			tags: vec!["work".to_string()],
			created_at: now,
			updated_at: now,
		};

		queries::insert_knowledge_item(&db.pool, &item)
			.await
			.expect("Failed to insert knowledge item.");
	}

	let rows = queries::fetch_knowledge_matches(&db.pool, "alice", "marketing", 5)
		.await
		.expect("Failed to run full-text lookup.");

	assert_eq!(rows.len(), 1);
	assert_eq!(rows[0].title, "Marketing deck");

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set MNEMO_PG_DSN to run."]
async fn match_limit_caps_returned_rows() {
	let Some(base_dsn) = mnemo_testkit::env_dsn() else {
		eprintln!("Skipping match_limit_caps_returned_rows; set MNEMO_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let db = bootstrapped_db(&test_db).await;
	let now = OffsetDateTime::now_utc();

	for i in 0..8 {
		let item = KnowledgeItem {
			item_id: Uuid::new_v4(),
			owner_id: "alice".to_string(),
			title: format!("Marketing note {i}"),
			content: "marketing presentation follow-up".to_string(),
			content_type: "text".to_string(),
			tags: Vec::new(),
			created_at: now,
			updated_at: now,
		};

		queries::insert_knowledge_item(&db.pool, &item)
			.await
			.expect("Failed to insert knowledge item.");
	}

	let rows = queries::fetch_knowledge_matches(&db.pool, "alice", "marketing", 5)
		.await
		.expect("Failed to run full-text lookup.");

	assert_eq!(rows.len(), 5);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

//! The fixed, ordered list of schema and data migrations.

use super::Migration;

pub const MIGRATIONS: &[Migration] = &[
    Migration {
        name: "create_customers_table",
        up: &[r#"
            CREATE TABLE IF NOT EXISTS customers (
                id BIGSERIAL PRIMARY KEY,
                name VARCHAR(100) NOT NULL DEFAULT '',
                role VARCHAR(50) NOT NULL DEFAULT '',
                email VARCHAR(100) NOT NULL DEFAULT '',
                phone VARCHAR(20) NOT NULL DEFAULT '',
                contacted BOOLEAN NOT NULL DEFAULT FALSE
            )
            "#],
        down: &["DROP TABLE IF EXISTS customers"],
    },
    Migration {
        name: "insert_fake_customers",
        up: &[
            "INSERT INTO customers (name, role, email, phone, contacted) VALUES ('John Doe', 'CEO', 'john.doe@test.com', '12345678910', TRUE)",
            "INSERT INTO customers (name, role, email, phone, contacted) VALUES ('Jane Doe', 'CTO', 'jane.doe@test.com', '12345678940', TRUE)",
            "INSERT INTO customers (name, role, email, phone, contacted) VALUES ('Jack Doe', 'Developer', 'jack.doe@test.com', '12345678900', FALSE)",
        ],
        down: &[],
    },
];

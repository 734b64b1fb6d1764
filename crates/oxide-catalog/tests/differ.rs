//! Differ scenarios: both snapshots are built by walking statements, and
//! every diff is replayed on the old snapshot to check it lands on the new.

use oxide_catalog::prelude::*;
use oxide_ddl::ast::{
    AlterSpec, AlterTableStatement, ColumnDef, ColumnOption, CreateTableStatement, DefaultValue,
    IndexOptions, KeyPart, TableConstraint, TableOption,
};

fn snapshot(statements: &[Statement]) -> Database {
    walk_through(
        Database::new("test", Engine::MySql),
        statements,
        WalkOptions::new(),
    )
    .unwrap()
}

fn diff(old: &[Statement], new: &[Statement]) -> String {
    let old = snapshot(old);
    let new = snapshot(new);
    let differ = Differ::new();

    let statements = differ.diff(&old, &new).unwrap();
    let replayed = walk_through(old.clone(), &statements, WalkOptions::new()).unwrap();
    assert!(
        replayed.equivalent(&new),
        "replay diverged\nold: {old:#?}\nnew: {new:#?}\nreplayed: {replayed:#?}"
    );

    differ.diff_text(&old, &new).unwrap()
}

fn name_column() -> ColumnDef {
    ColumnDef::new("name", "VARCHAR(50)").not_null()
}

/// `book(name VARCHAR(50) NOT NULL, <constraint>)`
fn book(constraint: TableConstraint) -> Vec<Statement> {
    vec![CreateTableStatement::new("book")
        .column(name_column())
        .constraint(constraint)
        .into()]
}

/// `book(id INT, name VARCHAR(50) NOT NULL, <constraint>)`
fn book_with_id(constraint: TableConstraint) -> Vec<Statement> {
    vec![CreateTableStatement::new("book")
        .column(ColumnDef::new("id", "INT"))
        .column(name_column())
        .constraint(constraint)
        .into()]
}

fn book_idx(options: IndexOptions) -> TableConstraint {
    TableConstraint::index(["name"])
        .named("book_idx")
        .with_options(options)
}

fn primary(options: IndexOptions) -> TableConstraint {
    TableConstraint::primary_key(["name"]).with_options(options)
}

fn expr(text: &str) -> KeyPart {
    KeyPart::expression(text).unwrap()
}

#[test]
fn test_index_type() {
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new().using("BTREE"))),
            &book(book_idx(IndexOptions::new().using("HASH"))),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`(`name`) USING HASH;\n"
    );
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new().using("BTREE"))),
            &book(book_idx(IndexOptions::new().using("BTREE"))),
        ),
        ""
    );
    // BTREE is the default method.
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new())),
            &book(book_idx(IndexOptions::new().using("BTREE"))),
        ),
        ""
    );
}

#[test]
fn test_index_key_block_size() {
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new().key_block_size(30))),
            &book(book_idx(IndexOptions::new().key_block_size(50))),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`(`name`) KEY_BLOCK_SIZE=50;\n"
    );
    assert_eq!(
        diff(
            &book(primary(IndexOptions::new().key_block_size(30))),
            &book(primary(IndexOptions::new().key_block_size(50))),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`name`) KEY_BLOCK_SIZE=50;\n"
    );
}

#[test]
fn test_index_parser() {
    let fulltext = |parser: &str| {
        TableConstraint::fulltext(["name"])
            .named("book_idx")
            .with_options(IndexOptions::new().parser(parser))
    };
    assert_eq!(
        diff(&book(fulltext("parser_a")), &book(fulltext("parser_b"))),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD FULLTEXT `book_idx`(`name`) WITH PARSER `parser_b`;\n"
    );
    assert_eq!(
        diff(
            &book(primary(IndexOptions::new().parser("parser_a"))),
            &book(primary(IndexOptions::new().parser("parser_b"))),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`name`) WITH PARSER `parser_b`;\n"
    );
}

#[test]
fn test_index_comment() {
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new().comment("comment_a"))),
            &book(book_idx(IndexOptions::new().comment("comment_b"))),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`(`name`) COMMENT 'comment_b';\n"
    );
    assert_eq!(
        diff(
            &book(primary(IndexOptions::new().comment("comment_a"))),
            &book(primary(IndexOptions::new().comment("comment_b"))),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`name`) COMMENT 'comment_b';\n"
    );
}

#[test]
fn test_index_visibility() {
    assert_eq!(
        diff(
            &book(book_idx(IndexOptions::new())),
            &book(book_idx(IndexOptions::new().invisible())),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`(`name`) INVISIBLE;\n"
    );
    assert_eq!(
        diff(
            &book(primary(IndexOptions::new())),
            &book(primary(IndexOptions::new().invisible())),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`name`) INVISIBLE;\n"
    );
}

#[test]
fn test_identical_options_produce_nothing() {
    let options = IndexOptions::new()
        .key_block_size(30)
        .parser("parser_a")
        .comment("no difference!");
    let fulltext = TableConstraint::fulltext(["name"])
        .named("book_idx")
        .with_options(options.clone());
    assert_eq!(diff(&book(fulltext.clone()), &book(fulltext)), "");
    assert_eq!(
        diff(&book(primary(options.clone())), &book(primary(options))),
        ""
    );
}

#[test]
fn test_key_parts() {
    let comment = || IndexOptions::new().comment("comment_a");
    let index = |keys: Vec<KeyPart>| {
        TableConstraint::index(keys)
            .named("book_idx")
            .with_options(comment().using("BTREE"))
    };
    let pk = |keys: Vec<KeyPart>| TableConstraint::primary_key(keys).with_options(comment());
    let columns =
        |names: &[&str]| -> Vec<KeyPart> { names.iter().map(|n| KeyPart::column(*n)).collect() };

    assert_eq!(
        diff(
            &book_with_id(index(columns(&["id", "name"]))),
            &book_with_id(index(columns(&["id"]))),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`(`id`) COMMENT 'comment_a';\n"
    );
    assert_eq!(
        diff(
            &book_with_id(pk(columns(&["id", "name"]))),
            &book_with_id(pk(columns(&["id"]))),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`id`) COMMENT 'comment_a';\n"
    );
    assert_eq!(
        diff(
            &book_with_id(index(columns(&["id", "name"]))),
            &book_with_id(index(vec![expr("id + 1")])),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`((`id`+1)) COMMENT 'comment_a';\n"
    );
    assert_eq!(
        diff(
            &book_with_id(index(vec![expr("id + 1")])),
            &book_with_id(index(vec![expr("id + 2")])),
        ),
        "ALTER TABLE `book` DROP INDEX `book_idx`;\n\
         ALTER TABLE `book` ADD INDEX `book_idx`((`id`+2)) COMMENT 'comment_a';\n"
    );
    assert_eq!(
        diff(
            &book_with_id(pk(vec![expr("id + 1")])),
            &book_with_id(pk(vec![expr("id + 2")])),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY((`id`+2)) COMMENT 'comment_a';\n"
    );

    for keys in [columns(&["id", "name"]), vec![expr("id + 1")]] {
        assert_eq!(
            diff(&book_with_id(index(keys.clone())), &book_with_id(index(keys))),
            ""
        );
    }
}

#[test]
fn test_expression_spelling_is_not_a_change() {
    let index = |text: &str| TableConstraint::index(vec![expr(text)]).named("book_idx");
    assert_eq!(
        diff(
            &book_with_id(index("id + 1")),
            &book_with_id(index("(`id`)+1")),
        ),
        ""
    );
}

#[test]
fn test_column_leaving_primary_key_is_relaxed() {
    let pk = |keys: Vec<KeyPart>| TableConstraint::primary_key(keys);
    // `id` was NOT NULL only because of the old key.
    assert_eq!(
        diff(
            &book_with_id(pk(vec![KeyPart::column("id"), KeyPart::column("name")])),
            &book_with_id(pk(vec![expr("id + 1")])),
        ),
        "ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` MODIFY COLUMN `id` INT DEFAULT NULL;\n\
         ALTER TABLE `book` ADD PRIMARY KEY((`id`+1));\n"
    );
}

fn department(index: TableConstraint) -> Statement {
    CreateTableStatement::new("department")
        .column(ColumnDef::new("id", "int").not_null())
        .column(ColumnDef::new("name", "varchar(50)").not_null())
        .constraint(TableConstraint::primary_key(["id"]))
        .constraint(index)
        .option(TableOption::Engine("InnoDB".into()))
        .into()
}

fn nullable_int(name: &str) -> ColumnDef {
    ColumnDef::new(name, "int").option(ColumnOption::Default(DefaultValue::Null))
}

#[test]
fn test_foreign_key_renamed() {
    let schema = |fk: &str| {
        vec![
            CreateTableStatement::new("department")
                .column(ColumnDef::new("id", "INT"))
                .column(name_column())
                .constraint(TableConstraint::primary_key(["id"]))
                .into(),
            CreateTableStatement::new("employee")
                .column(ColumnDef::new("id", "INT"))
                .column(name_column())
                .column(ColumnDef::new("department_id", "INT"))
                .constraint(TableConstraint::primary_key(["id"]))
                .constraint(
                    TableConstraint::foreign_key(["department_id"], "department", ["id"])
                        .named(fk),
                )
                .into(),
        ]
    };
    assert_eq!(
        diff(&schema("employee_ibfk_1"), &schema("fk_2")),
        "ALTER TABLE `employee` ADD CONSTRAINT `fk_2` FOREIGN KEY (`department_id`) REFERENCES `department`(`id`);\n\
         ALTER TABLE `employee` DROP FOREIGN KEY `employee_ibfk_1`;\n"
    );
}

#[test]
fn test_foreign_key_narrowed_with_indexes() {
    let employee = |index: TableConstraint, fk: TableConstraint| -> Statement {
        CreateTableStatement::new("employee")
            .column(ColumnDef::new("id", "int").not_null())
            .column(ColumnDef::new("name", "varchar(50)").not_null())
            .column(nullable_int("department_id"))
            .column(
                ColumnDef::new("department_name", "varchar(50)")
                    .option(ColumnOption::Default(DefaultValue::Null)),
            )
            .constraint(TableConstraint::primary_key(["id"]))
            .constraint(index)
            .constraint(fk.named("employee_ibfk_1"))
            .option(TableOption::Engine("InnoDB".into()))
            .into()
    };

    let old = vec![
        department(TableConstraint::index(["id", "name"]).named("id_name_idx")),
        employee(
            TableConstraint::index(["department_id", "department_name"])
                .named("department_id_name_idx"),
            TableConstraint::foreign_key(
                ["department_id", "department_name"],
                "department",
                ["id", "name"],
            ),
        ),
    ];
    let new = vec![
        department(TableConstraint::index(["id"]).named("id_idx")),
        employee(
            TableConstraint::index(["department_id"]).named("department_id_idx"),
            TableConstraint::foreign_key(["department_id"], "department", ["id"]),
        ),
    ];

    assert_eq!(
        diff(&old, &new),
        "ALTER TABLE `department` ADD INDEX `id_idx`(`id`);\n\
         ALTER TABLE `employee` ADD INDEX `department_id_idx`(`department_id`);\n\
         ALTER TABLE `employee` DROP FOREIGN KEY `employee_ibfk_1`;\n\
         ALTER TABLE `employee` ADD CONSTRAINT `employee_ibfk_1` FOREIGN KEY (`department_id`) REFERENCES `department`(`id`);\n\
         ALTER TABLE `employee` DROP INDEX `department_id_name_idx`;\n\
         ALTER TABLE `department` DROP INDEX `id_name_idx`;\n"
    );
}

#[test]
fn test_self_referencing_foreign_key_moved() {
    let table = |with_manager: bool, fk_column: &str| -> Vec<Statement> {
        let mut stmt = CreateTableStatement::new("employeee")
            .column(ColumnDef::new("id", "int").not_null())
            .column(ColumnDef::new("name", "varchar(50)").not_null())
            .column(nullable_int("leader_id"));
        if with_manager {
            stmt = stmt.column(nullable_int("manager_id"));
        }
        vec![stmt
            .constraint(TableConstraint::primary_key(["id"]))
            .constraint(
                TableConstraint::foreign_key([fk_column], "employeee", ["id"])
                    .named("employee_ibfk_1"),
            )
            .into()]
    };
    assert_eq!(
        diff(&table(false, "leader_id"), &table(true, "manager_id")),
        "ALTER TABLE `employeee` ADD COLUMN (`manager_id` INT DEFAULT NULL);\n\
         ALTER TABLE `employeee` DROP FOREIGN KEY `employee_ibfk_1`;\n\
         ALTER TABLE `employeee` ADD CONSTRAINT `employee_ibfk_1` FOREIGN KEY (`manager_id`) REFERENCES `employeee`(`id`);\n"
    );
}

fn book_columns(address: bool, name_not_null: bool) -> CreateTableStatement {
    let mut name = ColumnDef::new("name", "VARCHAR(50)");
    if name_not_null {
        name = name.not_null();
    }
    let stmt = CreateTableStatement::new("book")
        .column(ColumnDef::new("id", "INT"))
        .column(name);
    if address {
        stmt.column(ColumnDef::new("address", "VARCHAR(50)").not_null())
    } else {
        stmt
    }
}

#[test]
fn test_add_column_then_replace_primary_key() {
    let old = vec![book_columns(false, false)
        .constraint(TableConstraint::primary_key(["id", "name"]))
        .into()];
    let new = vec![book_columns(true, true)
        .constraint(TableConstraint::primary_key(["id", "address"]))
        .into()];
    assert_eq!(
        diff(&old, &new),
        "ALTER TABLE `book` ADD COLUMN (`address` VARCHAR(50) NOT NULL);\n\
         ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`id`, `address`);\n"
    );

    let relaxed = vec![book_columns(true, false)
        .constraint(TableConstraint::primary_key(["id", "address"]))
        .into()];
    assert_eq!(
        diff(&old, &relaxed),
        "ALTER TABLE `book` ADD COLUMN (`address` VARCHAR(50) NOT NULL);\n\
         ALTER TABLE `book` DROP PRIMARY KEY;\n\
         ALTER TABLE `book` MODIFY COLUMN `name` VARCHAR(50) DEFAULT NULL;\n\
         ALTER TABLE `book` ADD PRIMARY KEY(`id`, `address`);\n"
    );
}

#[test]
fn test_add_column_then_add_index_with_other_name() {
    let old = vec![book_columns(false, false)
        .constraint(TableConstraint::index(["id", "name"]).named("id_name_idx"))
        .into()];
    let new = vec![book_columns(true, false)
        .constraint(TableConstraint::index(["id", "address"]).named("id_address_idx"))
        .into()];
    assert_eq!(
        diff(&old, &new),
        "ALTER TABLE `book` ADD COLUMN (`address` VARCHAR(50) NOT NULL);\n\
         ALTER TABLE `book` ADD INDEX `id_address_idx`(`id`, `address`);\n\
         ALTER TABLE `book` DROP INDEX `id_name_idx`;\n"
    );
}

#[test]
fn test_add_column_then_replace_index_with_same_name() {
    let old = vec![book_columns(false, false)
        .constraint(TableConstraint::index(["id", "name"]).named("idx"))
        .into()];
    let new = vec![book_columns(true, false)
        .constraint(TableConstraint::index(["id", "address"]).named("idx"))
        .into()];
    assert_eq!(
        diff(&old, &new),
        "ALTER TABLE `book` ADD COLUMN (`address` VARCHAR(50) NOT NULL);\n\
         ALTER TABLE `book` DROP INDEX `idx`;\n\
         ALTER TABLE `book` ADD INDEX `idx`(`id`, `address`);\n"
    );
}

#[test]
fn test_column_type_and_comment_changes() {
    let old = vec![CreateTableStatement::new("t")
        .column(ColumnDef::new("a", "int"))
        .column(ColumnDef::new("b", "varchar(10)").comment("old"))
        .into()];
    let new = vec![CreateTableStatement::new("t")
        .column(ColumnDef::new("a", "bigint").not_null().default_value("0"))
        .column(ColumnDef::new("b", "varchar(10)"))
        .into()];
    assert_eq!(
        diff(&old, &new),
        "ALTER TABLE `t` MODIFY COLUMN `a` BIGINT NOT NULL DEFAULT 0;\n\
         ALTER TABLE `t` MODIFY COLUMN `b` VARCHAR(10) DEFAULT NULL;\n"
    );
}

#[test]
fn test_new_table_replays_from_empty() {
    let new = vec![
        department(TableConstraint::unique(["name"]).named("uniq_name")),
        CreateTableStatement::new("employee")
            .column(ColumnDef::new("id", "int").primary_key().auto_increment())
            .column(nullable_int("department_id"))
            .column(
                ColumnDef::new("bio", "text")
                    .charset("utf8mb4")
                    .collate("utf8mb4_bin")
                    .comment("free text"),
            )
            .column(ColumnDef::new("created_at", "datetime").default_expr("CURRENT_TIMESTAMP"))
            .constraint(TableConstraint::fulltext(["bio"]).with_options(IndexOptions::new().parser("ngram")))
            .constraint(TableConstraint::foreign_key(["department_id"], "department", ["id"]))
            .option(TableOption::Comment("people".into()))
            .into(),
    ];
    let sql = diff(&[], &new);
    assert!(sql.starts_with("CREATE TABLE `department` (\n"));
    assert!(sql.contains("\n) ENGINE=InnoDB;\n"));
    assert!(sql.contains("CONSTRAINT `employee_ibfk_1` FOREIGN KEY (`department_id`) REFERENCES `department`(`id`)"));
    assert!(sql.ends_with(") COMMENT='people';\n"));

    assert_eq!(diff(&new, &[]), "DROP TABLE `employee`;\nDROP TABLE `department`;\n");
}

#[test]
fn test_views_follow_tables() {
    let old = vec![Statement::create_view("v_old", "SELECT 1")];
    let new = vec![
        CreateTableStatement::new("t")
            .column(ColumnDef::new("a", "int"))
            .into(),
        Statement::create_view("v_new", "SELECT `a` FROM `t`"),
    ];
    assert_eq!(
        diff(&old, &new),
        "CREATE TABLE `t` (\n  `a` INT DEFAULT NULL\n);\n\
         CREATE VIEW `v_new` AS SELECT `a` FROM `t`;\n\
         DROP VIEW `v_old`;\n"
    );
}

#[test]
fn test_rename_detection_keeps_columns() {
    let old = vec![CreateTableStatement::new("people")
        .column(ColumnDef::new("id", "int").primary_key())
        .column(ColumnDef::new("name", "varchar(20)"))
        .column(ColumnDef::new("email", "varchar(50)"))
        .into()];
    let new = vec![CreateTableStatement::new("person")
        .column(ColumnDef::new("id", "int").primary_key())
        .column(ColumnDef::new("name", "varchar(20)"))
        .column(ColumnDef::new("email", "varchar(50)"))
        .column(ColumnDef::new("phone", "varchar(20)"))
        .into()];

    let old = snapshot(&old);
    let new = snapshot(&new);
    let differ = Differ::with_options(DiffOptions::new().with_rename_detection());
    let statements = differ.diff(&old, &new).unwrap();
    let replayed = walk_through(old.clone(), &statements, WalkOptions::new()).unwrap();
    assert!(replayed.equivalent(&new));
    assert_eq!(
        differ.diff_text(&old, &new).unwrap(),
        "RENAME TABLE `people` TO `person`;\n\
         ALTER TABLE `person` ADD COLUMN (`phone` VARCHAR(20) DEFAULT NULL);\n"
    );
}

/// `t(a int, INDEX idx(a))` followed by `ALTER TABLE t <spec>`.
fn indexed_t(specs: &[AlterSpec]) -> Vec<Statement> {
    let mut statements = vec![CreateTableStatement::new("t")
        .column(ColumnDef::new("a", "int"))
        .constraint(TableConstraint::index(["a"]).named("idx"))
        .into()];
    for spec in specs {
        statements.push(AlterTableStatement::new("t").spec(spec.clone()).into());
    }
    statements
}

#[test]
fn test_column_renamed_in_case_only() {
    assert_eq!(
        diff(
            &indexed_t(&[]),
            &indexed_t(&[AlterSpec::rename_column("a", "A")]),
        ),
        "ALTER TABLE `t` CHANGE COLUMN `a` `A` INT DEFAULT NULL;\n"
    );
}

#[test]
fn test_column_renamed_in_case_and_moved() {
    let table = |first: &str, second: &str| -> Vec<Statement> {
        vec![CreateTableStatement::new("t")
            .column(ColumnDef::new(first, "int"))
            .column(ColumnDef::new(second, "int"))
            .into()]
    };
    assert_eq!(
        diff(&table("a", "b"), &table("B", "a")),
        "ALTER TABLE `t` CHANGE COLUMN `b` `B` INT DEFAULT NULL FIRST;\n"
    );
}

#[test]
fn test_index_renamed_in_case_only() {
    assert_eq!(
        diff(
            &indexed_t(&[]),
            &indexed_t(&[AlterSpec::rename_index("idx", "IDX")]),
        ),
        "ALTER TABLE `t` RENAME INDEX `idx` TO `IDX`;\n"
    );
    assert_eq!(
        diff(
            &indexed_t(&[]),
            &indexed_t(&[
                AlterSpec::DropIndex("idx".into()),
                AlterSpec::AddConstraint(
                    TableConstraint::unique(["a"]).named("IDX"),
                ),
            ]),
        ),
        "ALTER TABLE `t` DROP INDEX `idx`;\n\
         ALTER TABLE `t` ADD UNIQUE INDEX `IDX`(`a`);\n"
    );
}

#[test]
fn test_foreign_key_renamed_in_case_only() {
    let schema = |fk: &str| -> Vec<Statement> {
        vec![
            CreateTableStatement::new("department")
                .column(ColumnDef::new("id", "INT"))
                .constraint(TableConstraint::primary_key(["id"]))
                .into(),
            CreateTableStatement::new("employee")
                .column(ColumnDef::new("department_id", "INT"))
                .constraint(
                    TableConstraint::foreign_key(["department_id"], "department", ["id"])
                        .named(fk),
                )
                .into(),
        ]
    };
    assert_eq!(
        diff(&schema("fk_dept"), &schema("FK_DEPT")),
        "ALTER TABLE `employee` DROP FOREIGN KEY `fk_dept`;\n\
         ALTER TABLE `employee` ADD CONSTRAINT `FK_DEPT` FOREIGN KEY (`department_id`) REFERENCES `department`(`id`);\n"
    );
}

#[test]
fn test_view_replaced_by_table() {
    let old = vec![Statement::create_view("v", "SELECT 1")];
    let new = vec![CreateTableStatement::new("v")
        .column(ColumnDef::new("a", "int"))
        .into()];
    assert_eq!(
        diff(&old, &new),
        "DROP VIEW `v`;\n\
         CREATE TABLE `v` (\n  `a` INT DEFAULT NULL\n);\n"
    );
}

#[test]
fn test_table_replaced_by_view() {
    let old = vec![CreateTableStatement::new("t")
        .column(ColumnDef::new("a", "int"))
        .into()];
    let new = vec![Statement::create_view("t", "SELECT 1")];
    assert_eq!(
        diff(&old, &new),
        "DROP TABLE `t`;\n\
         CREATE VIEW `t` AS SELECT 1;\n"
    );
}

#[test]
fn test_table_and_view_swap_names() {
    let old = vec![
        CreateTableStatement::new("a")
            .column(ColumnDef::new("x", "int"))
            .into(),
        Statement::create_view("b", "SELECT 1"),
    ];
    let new = vec![
        CreateTableStatement::new("b")
            .column(ColumnDef::new("x", "int"))
            .into(),
        Statement::create_view("a", "SELECT 2"),
    ];
    assert_eq!(
        diff(&old, &new),
        "DROP VIEW `b`;\n\
         CREATE TABLE `b` (\n  `x` INT DEFAULT NULL\n);\n\
         DROP TABLE `a`;\n\
         CREATE VIEW `a` AS SELECT 2;\n"
    );
}

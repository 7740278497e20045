//! End-to-end compilation tests.
//!
//! Every registered dialect must compile without any database driver.
//! Generated SQL is checked against snapshots and parsed back with
//! sqlparser where it has a matching dialect.

use quarry::compile::CompileOutput;
use quarry::prelude::*;
use sqlparser::dialect::{
    BigQueryDialect, DuckDbDialect, GenericDialect, MsSqlDialect, MySqlDialect,
    PostgreSqlDialect, RedshiftSqlDialect, SQLiteDialect, SnowflakeDialect,
};
use sqlparser::parser::Parser;

fn parses(sql: &str, dialect: Dialect) -> bool {
    let parser_dialect: Box<dyn sqlparser::dialect::Dialect> = match dialect {
        Dialect::Postgres => Box::new(PostgreSqlDialect {}),
        Dialect::DuckDb => Box::new(DuckDbDialect {}),
        Dialect::MySql => Box::new(MySqlDialect {}),
        Dialect::TSql => Box::new(MsSqlDialect {}),
        Dialect::Snowflake => Box::new(SnowflakeDialect {}),
        Dialect::BigQuery => Box::new(BigQueryDialect {}),
        Dialect::Redshift => Box::new(RedshiftSqlDialect {}),
        Dialect::Sqlite => Box::new(SQLiteDialect {}),
        Dialect::Databricks | Dialect::Trino => Box::new(GenericDialect {}),
    };
    Parser::parse_sql(&*parser_dialect, sql).is_ok()
}

fn sql_table() -> Table {
    define_table(
        &[
            ("v1", "decimal(12, 2)"),
            ("v3", "int32"),
            ("v5", "float32"),
            ("v6", "double"),
            ("v7", "string"),
            ("v8", "boolean"),
        ],
        "testing",
    )
    .unwrap()
}

fn compact(expr: &Expr, dialect: Dialect) -> CompileOutput {
    let options = CompileOptions::default()
        .with_dialect(dialect)
        .with_pretty(false);
    compile(expr, &options).unwrap()
}

// ============================================================================
// Tables
// ============================================================================

#[test]
fn test_compile_without_dependencies() {
    let t = define_table(&[("a", "int64")], "t").unwrap();
    for id in quarry::available_dialects() {
        let sql = compile_to_sql(&t, id).unwrap();
        assert!(!sql.is_empty(), "{}", id);
        assert!(parses(&sql, Dialect::from_name(id).unwrap()), "{}: {}", id, sql);
    }
}

#[test]
fn test_compile_by_compiler_name() {
    let t = define_table(&[("a", "int64")], "t").unwrap();
    for dialect in Dialect::ALL {
        let by_id = compile_to_sql(&t, dialect.id()).unwrap();
        let by_name = compile_to_sql(&t, dialect.compiler_name()).unwrap();
        assert_eq!(by_id, by_name);
    }
}

#[test]
fn test_table_snapshots() {
    let t = define_table(&[("a", "int64")], "t").unwrap();

    insta::assert_snapshot!(compile_to_sql(&t, "duckdb").unwrap(), @r#"
    SELECT
      *
    FROM "t"
    "#);
    insta::assert_snapshot!(compile_to_sql(&t, "mssql").unwrap(), @r"
    SELECT
      *
    FROM [t]
    ");
    insta::assert_snapshot!(compile_to_sql(&t, "bigquery").unwrap(), @r"
    SELECT
      *
    FROM `t`
    ");
}

#[test]
fn test_unknown_dialect_lists_available() {
    let t = define_table(&[("a", "int64")], "t").unwrap();
    let err = compile_to_sql(&t, "oracle").unwrap_err();
    let message = err.to_string();
    for id in quarry::available_dialects() {
        assert!(message.contains(id), "{} missing from {}", id, message);
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[test]
fn test_fill_null_snapshot() {
    let t = sql_table();
    let e = t.column("v3").unwrap().fill_null(0).unwrap();

    let sql = compile_to_sql(&e, "postgres").unwrap();
    insta::assert_snapshot!(sql, @r#"
    SELECT
      COALESCE("v3", 0) AS "Coalesce(v3, 0)"
    FROM "testing"
    "#);
    assert!(parses(&sql, Dialect::Postgres));
}

#[test]
fn test_round_snapshot() {
    let t = sql_table();
    let e = t.column("v6").unwrap().round(None).unwrap().name("r");

    let out = compact(&e, Dialect::TSql);
    insta::assert_snapshot!(out.sql, @"SELECT CAST(ROUND([v6], 0) AS BIGINT) AS [r] FROM [testing]");
    assert!(parses(&out.sql, Dialect::TSql));

    let out = compact(&e, Dialect::DuckDb);
    insta::assert_snapshot!(out.sql, @r#"SELECT CAST(ROUND("v6") AS BIGINT) AS "r" FROM "testing""#);
}

#[test]
fn test_group_concat_filter_snapshots() {
    let t = sql_table();
    let e = t
        .column("v7")
        .unwrap()
        .group_concat(None, Some(t.column("v8").unwrap().into()))
        .unwrap()
        .name("names");

    let out = compact(&e, Dialect::DuckDb);
    insta::assert_snapshot!(out.sql, @r#"SELECT STRING_AGG("v7", ',') FILTER (WHERE "v8") AS "names" FROM "testing""#);

    let out = compact(&e, Dialect::Snowflake);
    insta::assert_snapshot!(out.sql, @r#"SELECT LISTAGG(CASE WHEN "v8" THEN "v7" ELSE NULL END, ',') AS "names" FROM "testing""#);

    let out = compact(&e, Dialect::Trino);
    insta::assert_snapshot!(out.sql, @r#"SELECT ARRAY_JOIN(ARRAY_AGG(CASE WHEN "v8" THEN "v7" ELSE NULL END), ',') AS "names" FROM "testing""#);

    let out = compact(&e, Dialect::TSql);
    insta::assert_snapshot!(out.sql, @"SELECT STRING_AGG(CASE WHEN [v8] = 1 THEN [v7] ELSE NULL END, ',') AS [names] FROM [testing]");
    assert!(parses(&out.sql, Dialect::TSql));
}

#[test]
fn test_round_digits_snapshots() {
    let t = sql_table();
    let e = t.column("v6").unwrap().round(Some(2.into())).unwrap().name("r");

    let out = compact(&e, Dialect::Postgres);
    insta::assert_snapshot!(out.sql, @r#"SELECT CAST(ROUND(CAST("v6" AS NUMERIC), 2) AS DOUBLE PRECISION) AS "r" FROM "testing""#);
    assert!(parses(&out.sql, Dialect::Postgres));

    let out = compact(&e, Dialect::DuckDb);
    insta::assert_snapshot!(out.sql, @r#"SELECT ROUND("v6", 2) AS "r" FROM "testing""#);
}

#[test]
fn test_invalid_decimal_cast_is_an_error() {
    let err = literal(1.5).cast_to(DataType::decimal(2, 5)).unwrap_err();
    assert!(matches!(err, QuarryError::Parse { .. }), "{:?}", err);

    let e = literal(1.5).cast_to(DataType::decimal(38, 10)).unwrap().name("d");
    insta::assert_snapshot!(compact(&e, Dialect::BigQuery).sql, @"SELECT CAST(1.5 AS BIGNUMERIC(38, 10)) AS `d`");
}

#[test]
fn test_every_dialect_compiles_builtins() {
    let t = sql_table();
    let v3 = t.column("v3").unwrap();
    let exprs = vec![
        v3.abs().unwrap(),
        t.column("v5").unwrap().ceil().unwrap(),
        t.column("v6").unwrap().round(Some(2.into())).unwrap(),
        t.column("v1").unwrap().sign().unwrap(),
        greatest(args![&v3, 1]).unwrap().into_expr().unwrap(),
        least(args![&v3, 1]).unwrap().into_expr().unwrap(),
        v3.add(1).unwrap().mul(2).unwrap(),
        v3.div(2).unwrap(),
    ];

    for dialect in Dialect::ALL {
        for e in &exprs {
            let out = compact(e, dialect);
            assert!(out.sql.starts_with("SELECT "), "{}: {}", dialect, out.sql);
            assert!(out.sql.contains("testing"), "{}: {}", dialect, out.sql);
            assert_eq!(out.dialect, dialect);
        }
    }
}

#[test]
fn test_scalar_expression_has_no_from() {
    let e = coalesce(args![null(), 1, 2]).unwrap().into_expr().unwrap();
    let out = compact(&e, Dialect::Postgres);
    insta::assert_snapshot!(out.sql, @r#"SELECT COALESCE(NULL, 1, 2) AS "Coalesce(None, 1, 2)""#);
    assert!(out.query.from.is_none());
}

// ============================================================================
// Deferred
// ============================================================================

#[test]
fn test_resolved_template_compiles_like_direct() {
    let t = sql_table();
    let template = coalesce(args![null(), col("v3"), 2]).unwrap();
    let resolved = template.resolve(&t).unwrap();
    let direct = coalesce(args![null(), t.column("v3").unwrap(), 2])
        .unwrap()
        .into_expr()
        .unwrap();

    for dialect in Dialect::ALL {
        assert_eq!(compact(&resolved, dialect).sql, compact(&direct, dialect).sql);
    }
}

#[test]
fn test_unresolved_template_cannot_compile() {
    let template = placeholder().attr("v3").abs();
    let term = Term::from(template);
    let err = term.into_expr().unwrap_err();
    assert!(matches!(err, QuarryError::Unresolved { .. }));
}

#[test]
fn test_multiple_tables_rejected() {
    let a = define_table(&[("x", "int64")], "a").unwrap();
    let b = define_table(&[("y", "int64")], "b").unwrap();
    let e = a.column("x").unwrap().add(b.column("y").unwrap()).unwrap();
    let err = e.to_sql("duckdb").unwrap_err();
    assert!(matches!(err, QuarryError::MultipleTables { .. }));
}

#[test]
fn test_core_values_are_thread_safe() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expr>();
    assert_send_sync::<Deferred>();
    assert_send_sync::<Term>();
    assert_send_sync::<Table>();
    assert_send_sync::<Dialect>();

    let t = sql_table();
    let e = t.column("v3").unwrap().fill_null(0).unwrap();
    let handles: Vec<_> = Dialect::ALL
        .into_iter()
        .map(|dialect| {
            let e = e.clone();
            std::thread::spawn(move || compact(&e, dialect).sql)
        })
        .collect();
    for (handle, dialect) in handles.into_iter().zip(Dialect::ALL) {
        assert_eq!(handle.join().unwrap(), compact(&e, dialect).sql);
    }
}

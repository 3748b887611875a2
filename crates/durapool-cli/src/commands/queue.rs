//! Push, pop, len and drain

use anyhow::{Context, Result};
use base64::Engine;
use durapool::prelude::*;

fn open(uri: &str) -> Result<Box<dyn Pool>> {
    let registry = durapool::default_registry().context("Failed to register pool backends")?;
    registry
        .open(uri)
        .with_context(|| format!("Failed to open pool {}", uri))
}

/// Build the item to push from a command-line value
pub fn parse_item(value: &str, int: bool, base64: bool) -> Result<PoolItem> {
    if int {
        let v = value
            .trim()
            .parse::<i64>()
            .with_context(|| format!("'{}' is not an integer", value))?;
        return Ok(PoolItem::Int(v));
    }

    if base64 {
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(value)
            .context("Value is not valid base64")?;
        return Ok(PoolItem::Bytes(bytes));
    }

    Ok(PoolItem::from(value))
}

/// Render an item for stdout; raw bytes are printed base64-encoded
pub fn format_item(item: &PoolItem) -> String {
    match item {
        PoolItem::Bytes(bytes) => format!(
            "base64:{}",
            base64::engine::general_purpose::STANDARD.encode(bytes)
        ),
        other => other.to_string(),
    }
}

pub fn push(uri: &str, value: &str, int: bool, base64: bool) -> Result<()> {
    let item = parse_item(value, int, base64)?;
    let pool = open(uri)?;

    pool.push(&item).context("Failed to push item")?;
    tracing::info!(kind = item.kind(), "Pushed item");

    Ok(())
}

pub fn pop(uri: &str) -> Result<()> {
    let pool = open(uri)?;

    match pool.pop().context("Failed to pop item")? {
        Some(item) => println!("{}", format_item(&item)),
        None => tracing::info!("Pool is empty"),
    }

    Ok(())
}

pub fn len(uri: &str) -> Result<()> {
    let pool = open(uri)?;
    println!("{}", pool.length());
    Ok(())
}

pub fn drain(uri: &str, limit: Option<u64>) -> Result<()> {
    let pool = open(uri)?;

    let mut drained = 0u64;
    while limit.map_or(true, |limit| drained < limit) {
        match pool.pop().context("Failed to pop item")? {
            Some(item) => {
                println!("{}", format_item(&item));
                drained += 1;
            }
            None => break,
        }
    }

    tracing::info!(drained, remaining = pool.length(), "Drain finished");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("a", false, false).unwrap(), PoolItem::from("a"));
        assert_eq!(parse_item(" 12 ", true, false).unwrap(), PoolItem::Int(12));
        assert_eq!(
            parse_item("AQID", false, true).unwrap(),
            PoolItem::Bytes(vec![1, 2, 3])
        );
        assert!(parse_item("x", true, false).is_err());
        assert!(parse_item("***", false, true).is_err());
    }

    #[test]
    fn test_format_item() {
        assert_eq!(format_item(&PoolItem::from("hi")), "hi");
        assert_eq!(format_item(&PoolItem::Int(-1)), "-1");
        assert_eq!(format_item(&PoolItem::Bytes(vec![1, 2, 3])), "base64:AQID");
    }

    #[test]
    fn test_push_then_drain() {
        let temp_dir = tempfile::tempdir().unwrap();
        let uri = format!(
            "lmdb://cli?dsn={}",
            temp_dir.path().join("cli.mdb").display()
        );

        push(&uri, "first", false, false).unwrap();
        push(&uri, "2", true, false).unwrap();
        drain(&uri, Some(1)).unwrap();

        let pool = open(&uri).unwrap();
        assert_eq!(pool.pop().unwrap(), Some(PoolItem::Int(2)));
    }
}

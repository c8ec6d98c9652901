use sqlx::{
    encode::IsNull,
    error::BoxDynError,
    sqlite::{
        SqliteTypeInfo,
        SqliteValueRef,
    },
    Database,
    Decode,
    Encode,
    Sqlite,
    Type,
};

use super::Decimal;

// SQLite has no fixed precision decimal type, and NUMERIC affinity would
// coerce anything past 64 bits into a lossy REAL, so the canonical base-10
// digits are stored as TEXT.
impl Type<Sqlite> for Decimal {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
            || <i64 as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for Decimal {
    fn encode_by_ref(
        &self,
        buf: &mut <Sqlite as Database>::ArgumentBuffer<'q>,
    ) -> Result<IsNull, BoxDynError> {
        <String as Encode<'q, Sqlite>>::encode(self.to_string(), buf)
    }
}

impl<'r> Decode<'r, Sqlite> for Decimal {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let value = <&str as Decode<'r, Sqlite>>::decode(value)?;
        Ok(Decimal::parse(value)?)
    }
}

#[cfg(test)]
mod tests {
    use sqlx::{
        Connection,
        Row,
        SqliteConnection,
    };
    use crate::hexdecimal::{
        Decimal,
        hex_to_decimal,
    };

    #[async_std::test]
    async fn round_trip_text() -> anyhow::Result<()> {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
        sqlx::query("CREATE TABLE t (value TEXT)")
            .execute(&mut conn)
            .await?;
        let value = hex_to_decimal(&"f".repeat(83))?;
        sqlx::query("INSERT INTO t (value) VALUES (?1)")
            .bind(&value)
            .execute(&mut conn)
            .await?;
        let row = sqlx::query("SELECT value FROM t")
            .fetch_one(&mut conn)
            .await?;
        assert_eq!(row.try_get::<Decimal, _>("value")?, value);
        Ok(())
    }

    #[async_std::test]
    async fn decode_integer_storage() -> anyhow::Result<()> {
        let mut conn = SqliteConnection::connect("sqlite::memory:").await?;
        let row = sqlx::query("SELECT CAST(1715004 AS INTEGER) AS value")
            .fetch_one(&mut conn)
            .await?;
        assert_eq!(row.try_get::<Decimal, _>("value")?, Decimal::from(1715004u64));
        Ok(())
    }
}

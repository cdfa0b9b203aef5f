//! The four tables of the food-sharing database and their indexes.
//!
//! This schema is the contract between the CSV loader and the query layer.

/// The full database schema.
#[derive(Debug)]
pub struct Schema {
    pub tables: &'static [Table],
}

impl Schema {
    pub const FOOD: Schema = Schema {
        tables: &[PROVIDERS, RECEIVERS, FOOD_LISTINGS, CLAIMS],
    };

    pub fn table(&self, name: &str) -> Option<&'static Table> {
        self.tables.iter().find(|table| table.name == name)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub columns: &'static [Column],
    pub foreign_keys: &'static [ForeignKey],
    pub indices: &'static [Index],
}

#[derive(Debug, PartialEq, Eq)]
pub struct Column {
    pub name: &'static str,
    pub ty: ColumnType,
    pub primary_key: bool,
    pub nullable: bool,
}

/// Logical column type. Dates are stored as ISO-8601 text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Date,
    Timestamp,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ForeignKey {
    pub column: &'static str,
    pub target: &'static str,
    pub target_column: &'static str,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Index {
    pub name: &'static str,
    pub column: &'static str,
}

impl ColumnType {
    pub fn storage_type(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text | ColumnType::Date | ColumnType::Timestamp => "TEXT",
        }
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&'static Column> {
        self.columns.iter().find(|column| column.name == name)
    }

    pub fn primary_key(&self) -> &'static Column {
        self.columns
            .iter()
            .find(|column| column.primary_key)
            .expect("every table declares a primary key")
    }

    pub fn create_table_sql(&self) -> String {
        let mut sql = format!("CREATE TABLE IF NOT EXISTS {} (", self.name);
        let mut defs = vec![];

        for column in self.columns {
            let mut def = format!("{} {}", column.name, column.ty.storage_type());
            if column.primary_key {
                def.push_str(" PRIMARY KEY");
            } else if !column.nullable {
                def.push_str(" NOT NULL");
            }
            defs.push(def);
        }

        for fk in self.foreign_keys {
            defs.push(format!(
                "FOREIGN KEY ({}) REFERENCES {}({})",
                fk.column, fk.target, fk.target_column
            ));
        }

        sql.push_str(&defs.join(", "));
        sql.push(')');
        sql
    }

    pub fn create_indices_sql(&self) -> Vec<String> {
        self.indices
            .iter()
            .map(|index| {
                format!(
                    "CREATE INDEX IF NOT EXISTS {} ON {}({})",
                    index.name, self.name, index.column
                )
            })
            .collect()
    }

    /// `INSERT INTO <table> (<cols>) VALUES (?1, ...)` over every column.
    pub fn insert_sql(&self) -> String {
        let mut sql = format!("INSERT INTO {} (", self.name);
        let names: Vec<_> = self.columns.iter().map(|c| c.name).collect();
        sql.push_str(&names.join(", "));
        sql.push_str(") VALUES (");
        let params: Vec<_> = (1..=self.columns.len()).map(|i| format!("?{i}")).collect();
        sql.push_str(&params.join(", "));
        sql.push(')');
        sql
    }
}

const fn col(name: &'static str, ty: ColumnType) -> Column {
    Column {
        name,
        ty,
        primary_key: false,
        nullable: true,
    }
}

const fn key(name: &'static str) -> Column {
    Column {
        name,
        ty: ColumnType::Integer,
        primary_key: true,
        nullable: false,
    }
}

const fn required(name: &'static str) -> Column {
    Column {
        name,
        ty: ColumnType::Text,
        primary_key: false,
        nullable: false,
    }
}

pub const PROVIDERS: Table = Table {
    name: "providers",
    columns: &[
        key("provider_id"),
        required("name"),
        col("type", ColumnType::Text),
        col("address", ColumnType::Text),
        col("city", ColumnType::Text),
        col("contact", ColumnType::Text),
    ],
    foreign_keys: &[],
    indices: &[Index {
        name: "idx_providers_city",
        column: "city",
    }],
};

pub const RECEIVERS: Table = Table {
    name: "receivers",
    columns: &[
        key("receiver_id"),
        required("name"),
        col("type", ColumnType::Text),
        col("city", ColumnType::Text),
        col("contact", ColumnType::Text),
    ],
    foreign_keys: &[],
    indices: &[Index {
        name: "idx_receivers_city",
        column: "city",
    }],
};

pub const FOOD_LISTINGS: Table = Table {
    name: "food_listings",
    columns: &[
        key("food_id"),
        required("food_name"),
        col("quantity", ColumnType::Integer),
        col("expiry_date", ColumnType::Date),
        col("provider_id", ColumnType::Integer),
        col("provider_type", ColumnType::Text),
        col("location", ColumnType::Text),
        col("food_type", ColumnType::Text),
        col("meal_type", ColumnType::Text),
    ],
    foreign_keys: &[ForeignKey {
        column: "provider_id",
        target: "providers",
        target_column: "provider_id",
    }],
    indices: &[
        Index {
            name: "idx_food_provider",
            column: "provider_id",
        },
        Index {
            name: "idx_food_location",
            column: "location",
        },
    ],
};

pub const CLAIMS: Table = Table {
    name: "claims",
    columns: &[
        key("claim_id"),
        col("food_id", ColumnType::Integer),
        col("receiver_id", ColumnType::Integer),
        col("status", ColumnType::Text),
        col("timestamp", ColumnType::Timestamp),
    ],
    foreign_keys: &[
        ForeignKey {
            column: "food_id",
            target: "food_listings",
            target_column: "food_id",
        },
        ForeignKey {
            column: "receiver_id",
            target: "receivers",
            target_column: "receiver_id",
        },
    ],
    indices: &[
        Index {
            name: "idx_claims_food",
            column: "food_id",
        },
        Index {
            name: "idx_claims_receiver",
            column: "receiver_id",
        },
    ],
};

//! Explicit schema registry.
//!
//! Lists every entity table with its columns and foreign keys (including the
//! deletion policy each key must carry). The registry is built once at
//! startup and [`SchemaRegistry::verify`] compares it with the live database
//! after migrations, so a drifted schema fails fast instead of surfacing as
//! a wrong cascade at runtime.

use std::collections::HashSet;

use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// What happens to a referencing row when its target is deleted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OnDelete {
    /// The referencing row is deleted too.
    Cascade,
    /// The referencing column is cleared.
    SetNull,
}

impl OnDelete {
    /// The `delete_rule` value reported by `information_schema`.
    pub fn as_rule(self) -> &'static str {
        match self {
            OnDelete::Cascade => "CASCADE",
            OnDelete::SetNull => "SET NULL",
        }
    }
}

/// A foreign key declared on an entity table.
#[derive(Debug, Clone, Copy)]
pub struct RelationDef {
    pub column: &'static str,
    pub references: &'static str,
    pub on_delete: OnDelete,
}

/// One entity table.
#[derive(Debug, Clone, Copy)]
pub struct EntitySchema {
    pub entity: &'static str,
    pub table: &'static str,
    pub columns: &'static [&'static str],
    pub relations: &'static [RelationDef],
}

const TIMESTAMPS: [&str; 2] = ["created_at", "updated_at"];

const ENTITIES: &[EntitySchema] = &[
    EntitySchema {
        entity: "Article",
        table: "articles",
        columns: &[
            "id", "title", "preview_image", "content", "show_at_index", "is_published",
            TIMESTAMPS[0], TIMESTAMPS[1],
        ],
        relations: &[],
    },
    EntitySchema {
        entity: "CuisineType",
        table: "cuisine_types",
        columns: &["id", "name", TIMESTAMPS[0], TIMESTAMPS[1]],
        relations: &[],
    },
    EntitySchema {
        entity: "RestaurantCategory",
        table: "restaurant_categories",
        columns: &["id", "name", "cuisine_type_id", TIMESTAMPS[0], TIMESTAMPS[1]],
        relations: &[RelationDef {
            column: "cuisine_type_id",
            references: "cuisine_types",
            on_delete: OnDelete::Cascade,
        }],
    },
    EntitySchema {
        entity: "Region",
        table: "regions",
        columns: &["id", "name", TIMESTAMPS[0], TIMESTAMPS[1]],
        relations: &[],
    },
    EntitySchema {
        entity: "Tag",
        table: "tags",
        columns: &["id", "name", TIMESTAMPS[0], TIMESTAMPS[1]],
        relations: &[],
    },
    EntitySchema {
        entity: "Restaurant",
        table: "restaurants",
        columns: &[
            "id", "name", "branch_name", "description", "address", "feature", "is_closed",
            "latitude", "longitude", "phone", "rating", "rating_count", "start_time",
            "end_time", "last_order_time", "category_id", "region_id",
            TIMESTAMPS[0], TIMESTAMPS[1],
        ],
        relations: &[
            RelationDef {
                column: "category_id",
                references: "restaurant_categories",
                on_delete: OnDelete::SetNull,
            },
            RelationDef {
                column: "region_id",
                references: "regions",
                on_delete: OnDelete::SetNull,
            },
        ],
    },
    EntitySchema {
        entity: "RestaurantTag",
        table: "restaurant_tags",
        columns: &["id", "restaurant_id", "tag_id", TIMESTAMPS[0], TIMESTAMPS[1]],
        relations: &[
            RelationDef {
                column: "restaurant_id",
                references: "restaurants",
                on_delete: OnDelete::Cascade,
            },
            RelationDef {
                column: "tag_id",
                references: "tags",
                on_delete: OnDelete::Cascade,
            },
        ],
    },
    EntitySchema {
        entity: "RestaurantImage",
        table: "restaurant_images",
        columns: &[
            "id", "restaurant_id", "is_representative", "name", "image", "sort_order",
            TIMESTAMPS[0], TIMESTAMPS[1],
        ],
        relations: &[RelationDef {
            column: "restaurant_id",
            references: "restaurants",
            on_delete: OnDelete::Cascade,
        }],
    },
    EntitySchema {
        entity: "RestaurantMenu",
        table: "restaurant_menus",
        columns: &[
            "id", "restaurant_id", "name", "price", "image", TIMESTAMPS[0], TIMESTAMPS[1],
        ],
        relations: &[RelationDef {
            column: "restaurant_id",
            references: "restaurants",
            on_delete: OnDelete::Cascade,
        }],
    },
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("Table {table} for entity {entity} does not exist")]
    MissingTable {
        entity: &'static str,
        table: &'static str,
    },

    #[error("Table {table} is missing columns: {columns:?}")]
    MissingColumns {
        table: &'static str,
        columns: Vec<&'static str>,
    },

    #[error("Foreign key {table}.{column} -> {references} should be ON DELETE {expected}, found {found}")]
    RelationMismatch {
        table: &'static str,
        column: &'static str,
        references: &'static str,
        expected: &'static str,
        found: String,
    },

    #[error("Schema introspection failed: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

/// The set of entity schemas owned by the persistence layer.
#[derive(Debug, Clone)]
pub struct SchemaRegistry {
    entities: &'static [EntitySchema],
}

impl Default for SchemaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self { entities: ENTITIES }
    }

    pub fn entities(&self) -> &[EntitySchema] {
        self.entities
    }

    /// Look up an entity schema by table name.
    pub fn get(&self, table: &str) -> Option<&EntitySchema> {
        self.entities.iter().find(|e| e.table == table)
    }

    /// Tables whose rows are deleted when a row of `table` is deleted.
    pub fn cascade_children(&self, table: &str) -> Vec<&'static str> {
        self.entities
            .iter()
            .filter(|e| {
                e.relations
                    .iter()
                    .any(|r| r.references == table && r.on_delete == OnDelete::Cascade)
            })
            .map(|e| e.table)
            .collect()
    }

    /// Compare every registered table, column and foreign key with the live
    /// database. Returns the first mismatch found.
    pub async fn verify(&self, pool: &PgPool) -> Result<(), SchemaError> {
        for entity in self.entities {
            let present: HashSet<String> = sqlx::query_scalar::<_, String>(
                "SELECT column_name::text FROM information_schema.columns \
                 WHERE table_schema = 'public' AND table_name = $1",
            )
            .bind(entity.table)
            .fetch_all(pool)
            .await?
            .into_iter()
            .collect();

            if present.is_empty() {
                return Err(SchemaError::MissingTable {
                    entity: entity.entity,
                    table: entity.table,
                });
            }

            let missing: Vec<&'static str> = entity
                .columns
                .iter()
                .copied()
                .filter(|c| !present.contains(*c))
                .collect();
            if !missing.is_empty() {
                return Err(SchemaError::MissingColumns {
                    table: entity.table,
                    columns: missing,
                });
            }

            for relation in entity.relations {
                let found = delete_rule(pool, entity.table, relation).await?;
                if found.as_deref() != Some(relation.on_delete.as_rule()) {
                    return Err(SchemaError::RelationMismatch {
                        table: entity.table,
                        column: relation.column,
                        references: relation.references,
                        expected: relation.on_delete.as_rule(),
                        found: found.unwrap_or_else(|| "no foreign key".into()),
                    });
                }
            }
        }

        tracing::debug!(entities = self.entities.len(), "Schema registry verified");
        Ok(())
    }
}

/// Delete rule of the foreign key `table.column -> references`, if one exists.
async fn delete_rule(
    pool: &PgPool,
    table: &str,
    relation: &RelationDef,
) -> Result<Option<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>(
        "SELECT rc.delete_rule::text \
         FROM information_schema.referential_constraints rc \
         JOIN information_schema.key_column_usage kcu \
           ON kcu.constraint_name = rc.constraint_name \
          AND kcu.constraint_schema = rc.constraint_schema \
         JOIN information_schema.constraint_column_usage ccu \
           ON ccu.constraint_name = rc.unique_constraint_name \
          AND ccu.constraint_schema = rc.unique_constraint_schema \
         WHERE kcu.table_schema = 'public' \
           AND kcu.table_name = $1 \
           AND kcu.column_name = $2 \
           AND ccu.table_name = $3 \
         LIMIT 1",
    )
    .bind(table)
    .bind(relation.column)
    .bind(relation.references)
    .fetch_optional(pool)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entity_has_id_and_timestamps() {
        for entity in SchemaRegistry::new().entities() {
            for col in ["id", "created_at", "updated_at"] {
                assert!(
                    entity.columns.contains(&col),
                    "{} is missing {col}",
                    entity.table
                );
            }
        }
    }

    #[test]
    fn relations_reference_registered_tables() {
        let registry = SchemaRegistry::new();
        for entity in registry.entities() {
            for relation in entity.relations {
                assert!(registry.get(relation.references).is_some());
                assert!(entity.columns.contains(&relation.column));
            }
        }
    }

    #[test]
    fn restaurant_cascades_to_children() {
        let mut children = SchemaRegistry::new().cascade_children("restaurants");
        children.sort_unstable();
        assert_eq!(
            children,
            vec!["restaurant_images", "restaurant_menus", "restaurant_tags"]
        );
    }

    #[test]
    fn category_and_region_are_set_null() {
        let registry = SchemaRegistry::new();
        let restaurant = registry.get("restaurants").unwrap();
        assert!(restaurant
            .relations
            .iter()
            .all(|r| r.on_delete == OnDelete::SetNull));
        assert!(registry.cascade_children("regions").is_empty());
    }
}

//! Initial schema migration.
//!
//! It creates the complete schema:
//!
//! - `users`: credentials and the running balance
//! - `transaction_categories`: categories owned by a single user
//! - `transaction_sub_categories`: sub-categories of a category
//! - `transactions`: posted income/expense records
//!
//! Every table carries the audit stamps `created_at`, `created_by`,
//! `updated_at`, `updated_by`.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// ─────────────────────────────────────────────────────────────────────────────
// Table identifiers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    Password,
    Balance,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum TransactionCategories {
    Table,
    Id,
    Name,
    UserId,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum TransactionSubCategories {
    Table,
    Id,
    Name,
    CategoryId,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

#[derive(Iden)]
enum Transactions {
    Table,
    Id,
    Amount,
    CategoryId,
    SubCategoryId,
    TransactionDate,
    TransactionType,
    Note,
    UserId,
    CreatedAt,
    CreatedBy,
    UpdatedAt,
    UpdatedBy,
}

// ─────────────────────────────────────────────────────────────────────────────
// Migration implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ───────────────────────────────────────────────────────────────────
        // 1. Users
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .string()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Username).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .col(
                        ColumnDef::new(Users::Balance)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Users::CreatedAt).timestamp().not_null())
                    .col(ColumnDef::new(Users::CreatedBy).string().not_null())
                    .col(ColumnDef::new(Users::UpdatedAt).timestamp())
                    .col(ColumnDef::new(Users::UpdatedBy).string())
                    .to_owned(),
            )
            .await?;

        // Registration relies on these to reject duplicates.
        manager
            .create_index(
                Index::create()
                    .name("idx-users-username-unique")
                    .table(Users::Table)
                    .col(Users::Username)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 2. Categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TransactionCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::UserId)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionCategories::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransactionCategories::UpdatedAt).timestamp())
                    .col(ColumnDef::new(TransactionCategories::UpdatedBy).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_categories-user_id")
                            .from(TransactionCategories::Table, TransactionCategories::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction_categories-user_id")
                    .table(TransactionCategories::Table)
                    .col(TransactionCategories::UserId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 3. Sub-categories
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(TransactionSubCategories::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TransactionSubCategories::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(TransactionSubCategories::Name)
                            .string()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionSubCategories::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionSubCategories::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TransactionSubCategories::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(TransactionSubCategories::UpdatedAt).timestamp())
                    .col(ColumnDef::new(TransactionSubCategories::UpdatedBy).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transaction_sub_categories-category_id")
                            .from(
                                TransactionSubCategories::Table,
                                TransactionSubCategories::CategoryId,
                            )
                            .to(TransactionCategories::Table, TransactionCategories::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transaction_sub_categories-category_id")
                    .table(TransactionSubCategories::Table)
                    .col(TransactionSubCategories::CategoryId)
                    .to_owned(),
            )
            .await?;

        // ───────────────────────────────────────────────────────────────────
        // 4. Transactions
        // ───────────────────────────────────────────────────────────────────
        manager
            .create_table(
                Table::create()
                    .table(Transactions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Transactions::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Transactions::Amount)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CategoryId)
                            .integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::SubCategoryId).integer())
                    .col(
                        ColumnDef::new(Transactions::TransactionDate)
                            .date()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::TransactionType)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::Note).string())
                    .col(ColumnDef::new(Transactions::UserId).string().not_null())
                    .col(
                        ColumnDef::new(Transactions::CreatedAt)
                            .timestamp()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Transactions::CreatedBy)
                            .string()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Transactions::UpdatedAt).timestamp())
                    .col(ColumnDef::new(Transactions::UpdatedBy).string())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-category_id")
                            .from(Transactions::Table, Transactions::CategoryId)
                            .to(TransactionCategories::Table, TransactionCategories::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-sub_category_id")
                            .from(Transactions::Table, Transactions::SubCategoryId)
                            .to(
                                TransactionSubCategories::Table,
                                TransactionSubCategories::Id,
                            )
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-transactions-user_id")
                            .from(Transactions::Table, Transactions::UserId)
                            .to(Users::Table, Users::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Listing filters by owner and walks `(transaction_date, id)`.
        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-user_id-transaction_date-id")
                    .table(Transactions::Table)
                    .col(Transactions::UserId)
                    .col(Transactions::TransactionDate)
                    .col(Transactions::Id)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-category_id")
                    .table(Transactions::Table)
                    .col(Transactions::CategoryId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-transactions-sub_category_id")
                    .table(Transactions::Table)
                    .col(Transactions::SubCategoryId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Drop in reverse order of creation (respecting FK dependencies)
        manager
            .drop_table(Table::drop().table(Transactions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionSubCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TransactionCategories::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}

//! Schema migrations for the `oms_*` tables.

// `MigrationTrait::up`/`down` declare the `SchemaManager` lifetime as
// late-bound, so the elided form is the only one the trait accepts.
#![allow(elided_lifetimes_in_paths)]

use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_people_tables::Migration),
            Box::new(m20240601_000002_create_order_tables::Migration),
            Box::new(m20240601_000003_create_staffing_tables::Migration),
        ]
    }
}

mod m20240601_000001_create_people_tables {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000001_create_people_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Name).string().not_null())
                        .col(ColumnDef::new(Users::Email).string().null())
                        .col(ColumnDef::new(Users::Phone).string().null())
                        .col(ColumnDef::new(Users::Role).string().not_null())
                        .col(
                            ColumnDef::new(Users::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Users::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Customers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Customers::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::CustomerCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Customers::Name).string().not_null())
                        .col(ColumnDef::new(Customers::Phone).string().not_null())
                        .col(ColumnDef::new(Customers::Email).string().null())
                        .col(ColumnDef::new(Customers::Address).string().null())
                        .col(ColumnDef::new(Customers::City).string().null())
                        .col(ColumnDef::new(Customers::PostalCode).string().null())
                        .col(
                            ColumnDef::new(Customers::WhatsappOptIn)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Customers::SmsOptIn)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(
                            ColumnDef::new(Customers::EmailOptIn)
                                .boolean()
                                .not_null()
                                .default(false),
                        )
                        .col(ColumnDef::new(Customers::Notes).string().null())
                        .col(
                            ColumnDef::new(Customers::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Customers::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Stores::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Stores::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Stores::Code)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Stores::Name).string().not_null())
                        .col(ColumnDef::new(Stores::Address).string().null())
                        .col(ColumnDef::new(Stores::Phone).string().null())
                        .col(ColumnDef::new(Stores::ManagerId).uuid().null())
                        .col(
                            ColumnDef::new(Stores::IsActive)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Stores::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Measurements::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Measurements::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Measurements::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Measurements::Unit).string().not_null())
                        .col(ColumnDef::new(Measurements::Neck).decimal().null())
                        .col(ColumnDef::new(Measurements::Chest).decimal().null())
                        .col(ColumnDef::new(Measurements::Waist).decimal().null())
                        .col(ColumnDef::new(Measurements::Hip).decimal().null())
                        .col(ColumnDef::new(Measurements::ShoulderWidth).decimal().null())
                        .col(ColumnDef::new(Measurements::SleeveLength).decimal().null())
                        .col(ColumnDef::new(Measurements::Bicep).decimal().null())
                        .col(ColumnDef::new(Measurements::Wrist).decimal().null())
                        .col(ColumnDef::new(Measurements::Armhole).decimal().null())
                        .col(ColumnDef::new(Measurements::ShirtLength).decimal().null())
                        .col(
                            ColumnDef::new(Measurements::FrontNeckDepth)
                                .decimal()
                                .null(),
                        )
                        .col(ColumnDef::new(Measurements::BackNeckDepth).decimal().null())
                        .col(ColumnDef::new(Measurements::Yoke).decimal().null())
                        .col(ColumnDef::new(Measurements::Cuff).decimal().null())
                        .col(ColumnDef::new(Measurements::Collar).decimal().null())
                        .col(ColumnDef::new(Measurements::TrouserWaist).decimal().null())
                        .col(ColumnDef::new(Measurements::TrouserLength).decimal().null())
                        .col(ColumnDef::new(Measurements::Inseam).decimal().null())
                        .col(ColumnDef::new(Measurements::Thigh).decimal().null())
                        .col(ColumnDef::new(Measurements::Knee).decimal().null())
                        .col(ColumnDef::new(Measurements::Ankle).decimal().null())
                        .col(ColumnDef::new(Measurements::Notes).string().null())
                        .col(ColumnDef::new(Measurements::RecordedBy).uuid().null())
                        .col(
                            ColumnDef::new(Measurements::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Measurements::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_measurements_customer")
                                .from(Measurements::Table, Measurements::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Measurements::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Stores::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Customers::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        #[sea_orm(iden = "oms_users")]
        Table,
        Id,
        Name,
        Email,
        Phone,
        Role,
        IsActive,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Customers {
        #[sea_orm(iden = "oms_customers")]
        Table,
        Id,
        CustomerCode,
        Name,
        Phone,
        Email,
        Address,
        City,
        PostalCode,
        WhatsappOptIn,
        SmsOptIn,
        EmailOptIn,
        Notes,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Stores {
        #[sea_orm(iden = "oms_stores")]
        Table,
        Id,
        Code,
        Name,
        Address,
        Phone,
        ManagerId,
        IsActive,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Measurements {
        #[sea_orm(iden = "oms_customer_measurements")]
        Table,
        Id,
        CustomerId,
        Unit,
        Neck,
        Chest,
        Waist,
        Hip,
        ShoulderWidth,
        SleeveLength,
        Bicep,
        Wrist,
        Armhole,
        ShirtLength,
        FrontNeckDepth,
        BackNeckDepth,
        Yoke,
        Cuff,
        Collar,
        TrouserWaist,
        TrouserLength,
        Inseam,
        Thigh,
        Knee,
        Ankle,
        Notes,
        RecordedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20240601_000002_create_order_tables {
    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_people_tables::{Customers, Stores};

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000002_create_order_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Orders::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Orders::Id).uuid().primary_key().not_null())
                        .col(
                            ColumnDef::new(Orders::OrderNumber)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Orders::CustomerId).uuid().not_null())
                        .col(ColumnDef::new(Orders::StoreId).uuid().not_null())
                        .col(ColumnDef::new(Orders::OrderType).string().not_null())
                        .col(ColumnDef::new(Orders::Status).string().not_null())
                        .col(ColumnDef::new(Orders::Priority).string().not_null())
                        .col(ColumnDef::new(Orders::WorkflowStage).string().null())
                        .col(ColumnDef::new(Orders::GarmentType).string().not_null())
                        .col(ColumnDef::new(Orders::FabricDetails).string().null())
                        .col(ColumnDef::new(Orders::SpecialInstructions).string().null())
                        .col(ColumnDef::new(Orders::MeasurementId).uuid().null())
                        .col(
                            ColumnDef::new(Orders::TotalAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::AdvancePaid)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::BalanceAmount)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Orders::OrderDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::ExpectedDeliveryDate)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::ActualDeliveryDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::FittingDate)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::AdvancePaidAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::BalanceSettledAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(ColumnDef::new(Orders::AssignedTailorId).uuid().null())
                        .col(
                            ColumnDef::new(Orders::StitchingStartedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::StitchingCompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Orders::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Orders::Version)
                                .integer()
                                .not_null()
                                .default(1),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_customer")
                                .from(Orders::Table, Orders::CustomerId)
                                .to(Customers::Table, Customers::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_orders_store")
                                .from(Orders::Table, Orders::StoreId)
                                .to(Stores::Table, Stores::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(StatusHistory::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(StatusHistory::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(StatusHistory::OrderId).uuid().not_null())
                        .col(ColumnDef::new(StatusHistory::Status).string().not_null())
                        .col(ColumnDef::new(StatusHistory::Notes).string().null())
                        .col(ColumnDef::new(StatusHistory::UpdatedBy).uuid().null())
                        .col(ColumnDef::new(StatusHistory::UpdatedByName).string().null())
                        .col(
                            ColumnDef::new(StatusHistory::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_status_history_order")
                                .from(StatusHistory::Table, StatusHistory::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_status_history_order")
                        .table(StatusHistory::Table)
                        .col(StatusHistory::OrderId)
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(StatusHistory::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Orders::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub enum Orders {
        #[sea_orm(iden = "oms_orders")]
        Table,
        Id,
        OrderNumber,
        CustomerId,
        StoreId,
        OrderType,
        Status,
        Priority,
        WorkflowStage,
        GarmentType,
        FabricDetails,
        SpecialInstructions,
        MeasurementId,
        TotalAmount,
        AdvancePaid,
        BalanceAmount,
        OrderDate,
        ExpectedDeliveryDate,
        ActualDeliveryDate,
        FittingDate,
        AdvancePaidAt,
        BalanceSettledAt,
        AssignedTailorId,
        StitchingStartedAt,
        StitchingCompletedAt,
        CreatedAt,
        UpdatedAt,
        Version,
    }

    #[derive(DeriveIden)]
    pub enum StatusHistory {
        #[sea_orm(iden = "oms_order_status_history")]
        Table,
        Id,
        OrderId,
        Status,
        Notes,
        UpdatedBy,
        UpdatedByName,
        CreatedAt,
    }
}

mod m20240601_000003_create_staffing_tables {
    use sea_orm_migration::prelude::*;

    use super::m20240601_000001_create_people_tables::Users;
    use super::m20240601_000002_create_order_tables::Orders;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240601_000003_create_staffing_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Tailors::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Tailors::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Tailors::UserId).uuid().not_null())
                        .col(
                            ColumnDef::new(Tailors::TailorCode)
                                .string()
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Tailors::Specializations).json().not_null())
                        .col(ColumnDef::new(Tailors::SkillLevel).string().not_null())
                        .col(ColumnDef::new(Tailors::HourlyRate).decimal().null())
                        .col(
                            ColumnDef::new(Tailors::IsAvailable)
                                .boolean()
                                .not_null()
                                .default(true),
                        )
                        .col(
                            ColumnDef::new(Tailors::MaxConcurrentOrders)
                                .integer()
                                .not_null()
                                .default(5),
                        )
                        .col(
                            ColumnDef::new(Tailors::CurrentOrderCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Tailors::TotalOrdersCompleted)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Tailors::QualityRating)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Tailors::QualityChecksCount)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Tailors::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Tailors::UpdatedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_tailors_user")
                                .from(Tailors::Table, Tailors::UserId)
                                .to(Users::Table, Users::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Assignments::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Assignments::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Assignments::OrderId).uuid().not_null())
                        .col(ColumnDef::new(Assignments::TailorId).uuid().not_null())
                        .col(ColumnDef::new(Assignments::Status).string().not_null())
                        .col(ColumnDef::new(Assignments::AssignedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(Assignments::AssignedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(Assignments::StartedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Assignments::CompletedAt)
                                .timestamp_with_time_zone()
                                .null(),
                        )
                        .col(
                            ColumnDef::new(Assignments::EstimatedCompletionTime)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(Assignments::Notes).string().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_assignments_order")
                                .from(Assignments::Table, Assignments::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_assignments_tailor")
                                .from(Assignments::Table, Assignments::TailorId)
                                .to(Tailors::Table, Tailors::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_assignments_order")
                        .table(Assignments::Table)
                        .col(Assignments::OrderId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(QualityChecks::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(QualityChecks::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityChecks::OrderId).uuid().not_null())
                        .col(ColumnDef::new(QualityChecks::AssignmentId).uuid().null())
                        .col(ColumnDef::new(QualityChecks::CheckedBy).uuid().not_null())
                        .col(
                            ColumnDef::new(QualityChecks::StitchingQuality)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityChecks::FinishingQuality)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityChecks::MeasurementAccuracy)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityChecks::DesignAdherence)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(QualityChecks::OverallQuality)
                                .string()
                                .not_null(),
                        )
                        .col(ColumnDef::new(QualityChecks::Passed).boolean().not_null())
                        .col(ColumnDef::new(QualityChecks::Defects).json().not_null())
                        .col(
                            ColumnDef::new(QualityChecks::CorrectiveActions)
                                .string()
                                .null(),
                        )
                        .col(ColumnDef::new(QualityChecks::Notes).string().null())
                        .col(
                            ColumnDef::new(QualityChecks::CreatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_quality_checks_order")
                                .from(QualityChecks::Table, QualityChecks::OrderId)
                                .to(Orders::Table, Orders::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(Performance::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Performance::Id)
                                .uuid()
                                .primary_key()
                                .not_null(),
                        )
                        .col(ColumnDef::new(Performance::TailorId).uuid().not_null())
                        .col(ColumnDef::new(Performance::Period).date().not_null())
                        .col(
                            ColumnDef::new(Performance::OrdersCompleted)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Performance::ChecksPassed)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Performance::ChecksFailed)
                                .integer()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Performance::AverageRating)
                                .decimal()
                                .not_null()
                                .default(0),
                        )
                        .col(
                            ColumnDef::new(Performance::UpdatedAt)
                                .timestamp_with_time_zone()
                                .not_null(),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_performance_tailor")
                                .from(Performance::Table, Performance::TailorId)
                                .to(Tailors::Table, Tailors::Id),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .name("idx_performance_tailor_period")
                        .table(Performance::Table)
                        .col(Performance::TailorId)
                        .col(Performance::Period)
                        .unique()
                        .to_owned(),
                )
                .await?;

            Ok(())
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Performance::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(QualityChecks::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Assignments::Table).to_owned())
                .await?;
            manager
                .drop_table(Table::drop().table(Tailors::Table).to_owned())
                .await?;
            Ok(())
        }
    }

    #[derive(DeriveIden)]
    pub enum Tailors {
        #[sea_orm(iden = "oms_tailors")]
        Table,
        Id,
        UserId,
        TailorCode,
        Specializations,
        SkillLevel,
        HourlyRate,
        IsAvailable,
        MaxConcurrentOrders,
        CurrentOrderCount,
        TotalOrdersCompleted,
        QualityRating,
        QualityChecksCount,
        CreatedAt,
        UpdatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Assignments {
        #[sea_orm(iden = "oms_order_assignments")]
        Table,
        Id,
        OrderId,
        TailorId,
        Status,
        AssignedBy,
        AssignedAt,
        StartedAt,
        CompletedAt,
        EstimatedCompletionTime,
        Notes,
    }

    #[derive(DeriveIden)]
    pub enum QualityChecks {
        #[sea_orm(iden = "oms_quality_checks")]
        Table,
        Id,
        OrderId,
        AssignmentId,
        CheckedBy,
        StitchingQuality,
        FinishingQuality,
        MeasurementAccuracy,
        DesignAdherence,
        OverallQuality,
        Passed,
        Defects,
        CorrectiveActions,
        Notes,
        CreatedAt,
    }

    #[derive(DeriveIden)]
    pub enum Performance {
        #[sea_orm(iden = "oms_tailor_performance")]
        Table,
        Id,
        TailorId,
        Period,
        OrdersCompleted,
        ChecksPassed,
        ChecksFailed,
        AverageRating,
        UpdatedAt,
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::sea_query::Iden;

    use super::m20240601_000001_create_people_tables::{Customers, Measurements, Stores, Users};
    use super::m20240601_000002_create_order_tables::{Orders, StatusHistory};
    use super::m20240601_000003_create_staffing_tables::{
        Assignments, Performance, QualityChecks, Tailors,
    };

    #[test]
    fn table_idents_match_the_entity_table_names() {
        assert_eq!(Iden::to_string(&Users::Table), "oms_users");
        assert_eq!(Iden::to_string(&Customers::Table), "oms_customers");
        assert_eq!(Iden::to_string(&Stores::Table), "oms_stores");
        assert_eq!(
            Iden::to_string(&Measurements::Table),
            "oms_customer_measurements"
        );
        assert_eq!(Iden::to_string(&Orders::Table), "oms_orders");
        assert_eq!(
            Iden::to_string(&StatusHistory::Table),
            "oms_order_status_history"
        );
        assert_eq!(Iden::to_string(&Tailors::Table), "oms_tailors");
        assert_eq!(Iden::to_string(&Assignments::Table), "oms_order_assignments");
        assert_eq!(Iden::to_string(&QualityChecks::Table), "oms_quality_checks");
        assert_eq!(
            Iden::to_string(&Performance::Table),
            "oms_tailor_performance"
        );
    }

    #[test]
    fn column_idents_stay_snake_case() {
        assert_eq!(Iden::to_string(&Customers::CustomerCode), "customer_code");
        assert_eq!(Iden::to_string(&Orders::WorkflowStage), "workflow_stage");
        assert_eq!(Iden::to_string(&Tailors::CurrentOrderCount), "current_order_count");
    }
}

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, ForeignKeyAction, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

// ----- Iden enums for tables & columns -----
#[derive(DeriveIden)]
enum Cohorts {
    Table,
    Id,
    Name,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Squads {
    Table,
    Id,
    CohortId,
    Name,
    Points,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Teams {
    Table,
    Id,
    SquadId,
    Name,
    Points,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Members {
    Table,
    Id,
    TeamId,
    SquadId,
    DisplayName,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Submissions {
    Table,
    Id,
    CohortId,
    MemberId,
    SquadId,
    Title,
    Status,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Points {
    Table,
    Id,
    SubmissionId,
    TeamId,
    SquadId,
    FaceoffId,
    Week,
    Amount,
    Reason,
    CreatedAt,
}

#[derive(DeriveIden)]
enum Faceoffs {
    Table,
    Id,
    SquadId,
    Week,
    Slot,
    SubmissionAId,
    SubmissionBId,
    SeedAPoints,
    SeedBPoints,
    Resolved,
    WinnerSubmissionId,
    VotesA,
    VotesB,
    CreatedAt,
    ResolvedAt,
}

#[derive(DeriveIden)]
enum Votes {
    Table,
    Id,
    FaceoffId,
    VoterMemberId,
    SubmissionId,
    CreatedAt,
}

fn pk(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .big_integer()
        .not_null()
        .primary_key()
        .auto_increment()
        .to_owned()
}

fn created_at(col: impl IntoIden) -> ColumnDef {
    ColumnDef::new(col)
        .timestamp_with_time_zone()
        .not_null()
        .to_owned()
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // cohorts
        manager
            .create_table(
                Table::create()
                    .table(Cohorts::Table)
                    .if_not_exists()
                    .col(pk(Cohorts::Id))
                    .col(ColumnDef::new(Cohorts::Name).string().not_null())
                    .col(created_at(Cohorts::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // squads
        manager
            .create_table(
                Table::create()
                    .table(Squads::Table)
                    .if_not_exists()
                    .col(pk(Squads::Id))
                    .col(ColumnDef::new(Squads::CohortId).big_integer().not_null())
                    .col(ColumnDef::new(Squads::Name).string().not_null())
                    .col(
                        ColumnDef::new(Squads::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at(Squads::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_squads_cohort_id")
                            .from(Squads::Table, Squads::CohortId)
                            .to(Cohorts::Table, Cohorts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // teams
        manager
            .create_table(
                Table::create()
                    .table(Teams::Table)
                    .if_not_exists()
                    .col(pk(Teams::Id))
                    .col(ColumnDef::new(Teams::SquadId).big_integer().not_null())
                    .col(ColumnDef::new(Teams::Name).string().not_null())
                    .col(
                        ColumnDef::new(Teams::Points)
                            .big_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at(Teams::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teams_squad_id")
                            .from(Teams::Table, Teams::SquadId)
                            .to(Squads::Table, Squads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // members
        manager
            .create_table(
                Table::create()
                    .table(Members::Table)
                    .if_not_exists()
                    .col(pk(Members::Id))
                    .col(ColumnDef::new(Members::TeamId).big_integer().not_null())
                    .col(ColumnDef::new(Members::SquadId).big_integer().not_null())
                    .col(ColumnDef::new(Members::DisplayName).string().not_null())
                    .col(created_at(Members::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_team_id")
                            .from(Members::Table, Members::TeamId)
                            .to(Teams::Table, Teams::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_members_squad_id")
                            .from(Members::Table, Members::SquadId)
                            .to(Squads::Table, Squads::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // submissions: member_id/squad_id are plain references, they outlive
        // the member/squad rows across a test reset
        manager
            .create_table(
                Table::create()
                    .table(Submissions::Table)
                    .if_not_exists()
                    .col(pk(Submissions::Id))
                    .col(
                        ColumnDef::new(Submissions::CohortId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::MemberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Submissions::SquadId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Submissions::Title).string().not_null())
                    .col(
                        ColumnDef::new(Submissions::Status)
                            .string_len(16)
                            .not_null()
                            .default("PENDING"),
                    )
                    .col(created_at(Submissions::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_submissions_cohort_id")
                            .from(Submissions::Table, Submissions::CohortId)
                            .to(Cohorts::Table, Cohorts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_submissions_squad_status")
                    .table(Submissions::Table)
                    .col(Submissions::SquadId)
                    .col(Submissions::Status)
                    .to_owned(),
            )
            .await?;

        // faceoffs
        manager
            .create_table(
                Table::create()
                    .table(Faceoffs::Table)
                    .if_not_exists()
                    .col(pk(Faceoffs::Id))
                    .col(ColumnDef::new(Faceoffs::SquadId).big_integer().not_null())
                    .col(ColumnDef::new(Faceoffs::Week).integer().not_null())
                    .col(ColumnDef::new(Faceoffs::Slot).small_integer().not_null())
                    .col(
                        ColumnDef::new(Faceoffs::SubmissionAId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Faceoffs::SubmissionBId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Faceoffs::SeedAPoints)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Faceoffs::SeedBPoints).big_integer().null())
                    .col(
                        ColumnDef::new(Faceoffs::Resolved)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Faceoffs::WinnerSubmissionId)
                            .big_integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Faceoffs::VotesA)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Faceoffs::VotesB)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(created_at(Faceoffs::CreatedAt))
                    .col(
                        ColumnDef::new(Faceoffs::ResolvedAt)
                            .timestamp_with_time_zone()
                            .null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faceoffs_submission_a_id")
                            .from(Faceoffs::Table, Faceoffs::SubmissionAId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_faceoffs_submission_b_id")
                            .from(Faceoffs::Table, Faceoffs::SubmissionBId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ux_faceoffs_squad_week_slot")
                    .table(Faceoffs::Table)
                    .col(Faceoffs::SquadId)
                    .col(Faceoffs::Week)
                    .col(Faceoffs::Slot)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_faceoffs_resolved")
                    .table(Faceoffs::Table)
                    .col(Faceoffs::Resolved)
                    .to_owned(),
            )
            .await?;

        // votes
        manager
            .create_table(
                Table::create()
                    .table(Votes::Table)
                    .if_not_exists()
                    .col(pk(Votes::Id))
                    .col(ColumnDef::new(Votes::FaceoffId).big_integer().not_null())
                    .col(
                        ColumnDef::new(Votes::VoterMemberId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Votes::SubmissionId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(created_at(Votes::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_votes_faceoff_id")
                            .from(Votes::Table, Votes::FaceoffId)
                            .to(Faceoffs::Table, Faceoffs::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // one ballot per voter per faceoff
        manager
            .create_index(
                Index::create()
                    .name("ux_votes_faceoff_voter")
                    .table(Votes::Table)
                    .col(Votes::FaceoffId)
                    .col(Votes::VoterMemberId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // points ledger
        manager
            .create_table(
                Table::create()
                    .table(Points::Table)
                    .if_not_exists()
                    .col(pk(Points::Id))
                    .col(ColumnDef::new(Points::SubmissionId).big_integer().null())
                    .col(ColumnDef::new(Points::TeamId).big_integer().null())
                    .col(ColumnDef::new(Points::SquadId).big_integer().null())
                    .col(ColumnDef::new(Points::FaceoffId).big_integer().null())
                    .col(ColumnDef::new(Points::Week).integer().null())
                    .col(ColumnDef::new(Points::Amount).big_integer().not_null())
                    .col(ColumnDef::new(Points::Reason).string_len(16).not_null())
                    .col(created_at(Points::CreatedAt))
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_points_submission_id")
                            .from(Points::Table, Points::SubmissionId)
                            .to(Submissions::Table, Submissions::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("ix_points_submission_id")
                    .table(Points::Table)
                    .col(Points::SubmissionId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // drop in reverse order of creation; indexes go with their tables
        manager
            .drop_table(Table::drop().table(Points::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Votes::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Faceoffs::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(
                Table::drop()
                    .table(Submissions::Table)
                    .if_exists()
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Members::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teams::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Squads::Table).if_exists().to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Cohorts::Table).if_exists().to_owned())
            .await?;

        Ok(())
    }
}

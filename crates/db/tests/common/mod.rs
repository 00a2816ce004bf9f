//! Shared fixtures for repository and workflow integration tests.

#![allow(dead_code)]

use std::time::Duration;

use sqlx::PgPool;
use vitrail_core::actor::Actor;
use vitrail_core::project_status::ProjectStatus;
use vitrail_db::models::dealership::Dealership;
use vitrail_db::models::inlay::{CreateInlayRequest, Inlay, INLAY_TYPE_CUSTOM};
use vitrail_db::models::project::Project;
use vitrail_db::models::proof::CreateProofRequest;
use vitrail_db::models::user::{
    CreateDealershipUser, CreateInternalUser, DealershipUser, InternalUser,
};
use vitrail_db::repositories::{DealershipRepo, InlayRepo, ProjectRepo, UserRepo};
use vitrail_db::workflow::{ProofCreated, ProofWorkflow};

/// One dealership with a user on each side and a submitted project holding
/// a single inlay.
pub struct Fixture {
    pub dealership: Dealership,
    pub dealer_user: DealershipUser,
    pub internal_user: InternalUser,
    pub project: Project,
    pub inlay: Inlay,
}

impl Fixture {
    pub fn dealer_actor(&self) -> Actor {
        Actor::dealership(self.dealer_user.id, self.dealership.id)
    }

    pub fn internal_actor(&self) -> Actor {
        Actor::internal(self.internal_user.id)
    }
}

pub fn workflow(pool: &PgPool) -> ProofWorkflow {
    ProofWorkflow::new(pool.clone(), Duration::from_secs(5))
}

/// Seed a dealership, users, and a project already submitted for design
/// (`designing`) with one custom inlay.
pub async fn seed_project(pool: &PgPool, tag: &str) -> Fixture {
    let dealership = DealershipRepo::create(pool, &format!("Midtown Glassworks {tag}"))
        .await
        .unwrap();
    let dealer_user = UserRepo::create_dealership_user(
        pool,
        &CreateDealershipUser {
            dealership_id: dealership.id,
            display_name: "Dana Dealer".into(),
            email: format!("dana+{tag}@dealer.example"),
        },
    )
    .await
    .unwrap();
    let internal_user = UserRepo::create_internal_user(
        pool,
        &CreateInternalUser {
            display_name: "Ivy Designer".into(),
            email: format!("ivy+{tag}@vitrail.example"),
        },
    )
    .await
    .unwrap();

    let project = ProjectRepo::create(pool, dealership.id, &format!("Lobby panels {tag}"))
        .await
        .unwrap();
    // Submit for design: draft -> designing.
    let project = ProjectRepo::set_status(
        pool,
        project.id,
        project.version,
        ProjectStatus::Designing.as_str(),
        false,
    )
    .await
    .unwrap()
    .expect("fresh project must accept submission");

    let inlay = InlayRepo::create(
        pool,
        project.id,
        &CreateInlayRequest {
            inlay_type: INLAY_TYPE_CUSTOM.into(),
            label: "Entry door medallion".into(),
        },
    )
    .await
    .unwrap();

    Fixture {
        dealership,
        dealer_user,
        internal_user,
        project,
        inlay,
    }
}

/// Add another inlay to the fixture project.
pub async fn add_inlay(pool: &PgPool, project_id: i64, label: &str) -> Inlay {
    InlayRepo::create(
        pool,
        project_id,
        &CreateInlayRequest {
            inlay_type: INLAY_TYPE_CUSTOM.into(),
            label: label.into(),
        },
    )
    .await
    .unwrap()
}

/// Send a proof on an inlay, reading the inlay fresh for its current
/// version (as a client would).
pub async fn send_proof(
    pool: &PgPool,
    wf: &ProofWorkflow,
    inlay_id: i64,
    asset_url: &str,
    actor: &Actor,
) -> ProofCreated {
    let inlay = InlayRepo::find_by_id(pool, inlay_id).await.unwrap().unwrap();
    wf.create_proof(
        inlay_id,
        &CreateProofRequest {
            design_asset_url: asset_url.into(),
            price_group_id: None,
            price_cents: Some(48_000),
            inlay_version: inlay.version,
        },
        actor,
    )
    .await
    .expect("proof creation should succeed")
}

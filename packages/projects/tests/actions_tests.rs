// ABOUTME: Integration tests for the service layer
// ABOUTME: End-to-end board moves, sprint lifecycle and authorization against in-memory SQLite

use chrono::{Duration, Utc};

use scrumline_projects::{
    activity, issues, projects, sprints, Actor, BoardMove, DbState, DomainError, IssueCreateInput,
    IssueStatus, OrgRole, PaginationParams, Project, Slot, Sprint, SprintCreateInput, SprintStatus,
};

fn admin() -> Actor {
    Actor {
        user_id: "admin-1".to_string(),
        organization_id: "org1".to_string(),
        role: OrgRole::Admin,
    }
}

fn member() -> Actor {
    Actor {
        user_id: "member-1".to_string(),
        organization_id: "org1".to_string(),
        role: OrgRole::Member,
    }
}

fn outsider() -> Actor {
    Actor {
        user_id: "stranger-1".to_string(),
        organization_id: "org2".to_string(),
        role: OrgRole::Member,
    }
}

async fn setup() -> DbState {
    DbState::init_in_memory().await.unwrap()
}

#[tokio::test]
async fn init_creates_the_database_file_and_applies_migrations() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("scrumline.db");

    let db = DbState::init_with_path(&path).await.unwrap();
    assert!(path.exists());

    // Schema is usable straight away.
    seed_project(&db, "INI").await;
    let listed = projects::list_projects(&db, &admin()).await.unwrap();
    assert_eq!(listed.len(), 1);
}

async fn seed_project(db: &DbState, key: &str) -> Project {
    projects::create_project(
        db,
        &admin(),
        scrumline_projects::ProjectCreateInput {
            name: format!("Project {key}"),
            key: key.to_string(),
            description: None,
        },
    )
    .await
    .unwrap()
}

/// A sprint whose window contains `now`, so it can be started.
async fn seed_sprint(db: &DbState, project_id: &str) -> Sprint {
    let now = Utc::now();
    sprints::create_sprint(
        db,
        &admin(),
        project_id,
        SprintCreateInput {
            start_date: now - Duration::hours(1),
            end_date: now + Duration::days(13),
        },
    )
    .await
    .unwrap()
}

async fn seed_issue(
    db: &DbState,
    project_id: &str,
    sprint_id: &str,
    title: &str,
    status: IssueStatus,
) -> scrumline_projects::Issue {
    issues::create_issue(
        db,
        &member(),
        project_id,
        IssueCreateInput {
            title: title.to_string(),
            description: None,
            status,
            priority: None,
            sprint_id: Some(sprint_id.to_string()),
            assignee_id: None,
        },
    )
    .await
    .unwrap()
}

fn gesture(source: (IssueStatus, usize), destination: (IssueStatus, usize)) -> BoardMove {
    BoardMove {
        source: Slot {
            status: source.0,
            index: source.1,
        },
        destination: Some(Slot {
            status: destination.0,
            index: destination.1,
        }),
    }
}

#[tokio::test]
async fn board_move_end_to_end() {
    let db = setup().await;
    let project = seed_project(&db, "X").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();

    let a = seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;
    let b = seed_issue(&db, &project.id, &sprint.id, "B", IssueStatus::Todo).await;
    let c = seed_issue(&db, &project.id, &sprint.id, "C", IssueStatus::Done).await;
    assert_eq!((a.position, b.position, c.position), (0, 1, 0));

    let board = issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        gesture((IssueStatus::Todo, 1), (IssueStatus::Done, 0)),
    )
    .await
    .unwrap();

    let todo: Vec<_> = board
        .iter()
        .filter(|i| i.status == IssueStatus::Todo)
        .map(|i| (i.title.as_str(), i.position))
        .collect();
    let done: Vec<_> = board
        .iter()
        .filter(|i| i.status == IssueStatus::Done)
        .map(|i| (i.title.as_str(), i.position))
        .collect();
    assert_eq!(todo, vec![("A", 0)]);
    assert_eq!(done, vec![("B", 0), ("C", 1)]);

    // The stored board matches what the move returned.
    let reloaded = issues::get_issues_for_sprint(&db, &member(), &sprint.id)
        .await
        .unwrap();
    let stored: Vec<_> = reloaded
        .iter()
        .map(|i| (i.title.as_str(), i.status, i.position))
        .collect();
    assert_eq!(
        stored,
        vec![
            ("A", IssueStatus::Todo, 0),
            ("B", IssueStatus::Done, 0),
            ("C", IssueStatus::Done, 1)
        ]
    );
}

#[tokio::test]
async fn moves_are_rejected_until_the_sprint_starts() {
    let db = setup().await;
    let project = seed_project(&db, "PLN").await;
    let sprint = seed_sprint(&db, &project.id).await;
    seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;

    let err = issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        gesture((IssueStatus::Todo, 0), (IssueStatus::Done, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Board(_)), "got {err:?}");

    // Nothing was persisted.
    let board = issues::get_issues_for_sprint(&db, &member(), &sprint.id)
        .await
        .unwrap();
    assert_eq!(board[0].status, IssueStatus::Todo);
    assert_eq!(board[0].position, 0);
}

#[tokio::test]
async fn moves_are_rejected_after_the_sprint_completes() {
    let db = setup().await;
    let project = seed_project(&db, "CMP").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Completed)
        .await
        .unwrap();
    seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;

    let err = issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        gesture((IssueStatus::Todo, 0), (IssueStatus::Done, 0)),
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Board(_)));
}

#[tokio::test]
async fn cancelled_gesture_changes_nothing() {
    let db = setup().await;
    let project = seed_project(&db, "NOP").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();
    seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;

    let board = issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        BoardMove {
            source: Slot {
                status: IssueStatus::Todo,
                index: 0,
            },
            destination: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(board.len(), 1);
    assert_eq!(board[0].position, 0);
}

#[tokio::test]
async fn sprint_cannot_start_outside_its_window() {
    let db = setup().await;
    let project = seed_project(&db, "WIN").await;
    let now = Utc::now();
    let future = sprints::create_sprint(
        &db,
        &admin(),
        &project.id,
        SprintCreateInput {
            start_date: now + Duration::days(7),
            end_date: now + Duration::days(21),
        },
    )
    .await
    .unwrap();

    let err = sprints::update_sprint_status(&db, &admin(), &future.id, SprintStatus::Active)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StateTransition(_)));

    // Status is unchanged.
    let reloaded = sprints::get_sprint(&db, &admin(), &future.id).await.unwrap();
    assert_eq!(reloaded.status, SprintStatus::Planned);
}

#[tokio::test]
async fn sprint_can_only_complete_from_active() {
    let db = setup().await;
    let project = seed_project(&db, "ACT").await;
    let sprint = seed_sprint(&db, &project.id).await;

    let err = sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Completed)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StateTransition(_)));
}

#[tokio::test]
async fn only_planned_sprints_can_be_deleted() {
    let db = setup().await;
    let project = seed_project(&db, "DEL").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();

    let err = sprints::delete_sprint(&db, &admin(), &sprint.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::StateTransition(_)));

    let planned = seed_sprint(&db, &project.id).await;
    sprints::delete_sprint(&db, &admin(), &planned.id)
        .await
        .unwrap();
}

#[tokio::test]
async fn sprint_names_count_up_and_never_reuse_numbers() {
    let db = setup().await;
    let project = seed_project(&db, "ABC").await;

    let s1 = seed_sprint(&db, &project.id).await;
    let s2 = seed_sprint(&db, &project.id).await;
    let s3 = seed_sprint(&db, &project.id).await;
    assert_eq!(s1.name, "ABC-1");
    assert_eq!(s2.name, "ABC-2");
    assert_eq!(s3.name, "ABC-3");

    sprints::delete_sprint(&db, &admin(), &s2.id).await.unwrap();
    let s4 = seed_sprint(&db, &project.id).await;
    assert_eq!(s4.name, "ABC-4");
}

#[tokio::test]
async fn default_sprint_prefers_the_active_one() {
    let db = setup().await;
    let project = seed_project(&db, "DFT").await;
    let _planned = seed_sprint(&db, &project.id).await;
    let second = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &second.id, SprintStatus::Active)
        .await
        .unwrap();

    let default = sprints::get_default_sprint(&db, &member(), &project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(default.id, second.id);
}

#[tokio::test]
async fn project_mutations_require_an_admin() {
    let db = setup().await;

    let err = projects::create_project(
        &db,
        &member(),
        scrumline_projects::ProjectCreateInput {
            name: "Nope".to_string(),
            key: "NO".to_string(),
            description: None,
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));

    let project = seed_project(&db, "ADM").await;
    let err = projects::delete_project(&db, &member(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));
}

#[tokio::test]
async fn resources_are_scoped_to_the_actors_organization() {
    let db = setup().await;
    let project = seed_project(&db, "ORG").await;
    let sprint = seed_sprint(&db, &project.id).await;

    let err = projects::get_project(&db, &outsider(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));

    let err = issues::get_issues_for_sprint(&db, &outsider(), &sprint.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));
}

#[tokio::test]
async fn issue_deletion_is_reporter_or_admin_only() {
    let db = setup().await;
    let project = seed_project(&db, "RPT").await;
    let sprint = seed_sprint(&db, &project.id).await;
    let issue = seed_issue(&db, &project.id, &sprint.id, "mine", IssueStatus::Todo).await;

    let other_member = Actor {
        user_id: "member-2".to_string(),
        organization_id: "org1".to_string(),
        role: OrgRole::Member,
    };
    let err = issues::delete_issue(&db, &other_member, &issue.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Authorization(_)));

    // The reporter can delete their own issue.
    issues::delete_issue(&db, &member(), &issue.id).await.unwrap();

    // And an admin can delete anyone's.
    let issue = seed_issue(&db, &project.id, &sprint.id, "other", IssueStatus::Todo).await;
    issues::delete_issue(&db, &admin(), &issue.id).await.unwrap();
}

#[tokio::test]
async fn moves_leave_an_activity_trail() {
    let db = setup().await;
    let project = seed_project(&db, "LOG").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();
    seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;
    seed_issue(&db, &project.id, &sprint.id, "B", IssueStatus::Done).await;

    issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        gesture((IssueStatus::Todo, 0), (IssueStatus::Done, 0)),
    )
    .await
    .unwrap();

    // Appends are spawned after commit; give them a moment to land.
    let mut moved = Vec::new();
    for _ in 0..50 {
        let page = activity::get_activity_logs(&db, &member(), &PaginationParams::default())
            .await
            .unwrap();
        moved = page
            .data
            .into_iter()
            .filter(|log| log.message.starts_with("Moved issue"))
            .collect();
        if moved.len() >= 2 {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    }

    let mut messages: Vec<_> = moved.iter().map(|l| l.message.as_str()).collect();
    messages.sort();
    assert_eq!(
        messages,
        vec!["Moved issue \"A\" to DONE", "Moved issue \"B\" to DONE"]
    );
}

#[tokio::test]
async fn a_failing_activity_append_never_fails_the_move() {
    let db = setup().await;
    let project = seed_project(&db, "SWL").await;
    let sprint = seed_sprint(&db, &project.id).await;
    sprints::update_sprint_status(&db, &admin(), &sprint.id, SprintStatus::Active)
        .await
        .unwrap();
    seed_issue(&db, &project.id, &sprint.id, "A", IssueStatus::Todo).await;

    // Break the trail; the primary mutation must not notice.
    sqlx::query("DROP TABLE activity_logs")
        .execute(&db.pool)
        .await
        .unwrap();

    let board = issues::move_issues(
        &db,
        &member(),
        &sprint.id,
        gesture((IssueStatus::Todo, 0), (IssueStatus::InReview, 0)),
    )
    .await
    .unwrap();
    assert_eq!(board[0].status, IssueStatus::InReview);
}

//! Client against the in-memory dev server

mod common;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use studyplan::client::{ClientError, Session};
use studyplan::models::{
    timestamp, AssignmentInput, CourseInput, DayOfWeek, Priority, ScheduleInput,
};

fn at(day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2030, 3, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

#[tokio::test]
async fn test_auth_flow() {
    let anonymous = common::start_server().await;

    let client = common::sign_in(&anonymous, "ada@example.com").await;
    let me = client.auth().current_user().await.unwrap();
    assert_eq!(me.email, "ada@example.com");

    let err = anonymous.auth().current_user().await.unwrap_err();
    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(err.detail(), Some("Could not validate credentials"));

    let err = anonymous
        .auth()
        .login("ada@example.com", "wrong")
        .await
        .unwrap_err();
    assert_eq!(err.detail(), Some("Incorrect email or password"));
}

#[tokio::test]
async fn test_duplicate_registration_is_validation_error() {
    let anonymous = common::start_server().await;
    common::sign_in(&anonymous, "dup@example.com").await;

    let err = anonymous
        .auth()
        .register(&studyplan::models::NewUser {
            email: "dup@example.com".to_string(),
            full_name: "Again".to_string(),
            password: "x".to_string(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Validation { .. }));
    assert_eq!(err.detail(), Some("Email already registered"));
}

#[tokio::test]
async fn test_update_then_get_round_trip() {
    let client = common::signed_in_client().await;

    let course = client
        .courses()
        .create(&CourseInput::new("Statistics").code("STA210"))
        .await
        .unwrap();

    let input = CourseInput::new("Applied Statistics")
        .code("STA211")
        .instructor("Dr. Fisher");
    let updated = client.courses().update(&course.id, &input).await.unwrap();
    let fetched = client.courses().get_by_id(&course.id).await.unwrap();

    assert_eq!(updated, fetched);
    assert_eq!(fetched.to_input(), input);
}

#[tokio::test]
async fn test_assignment_update_then_get_keeps_subsecond_due_date() {
    let client = common::signed_in_client().await;
    let course = client
        .courses()
        .create(&CourseInput::new("History"))
        .await
        .unwrap();
    let other = client
        .courses()
        .create(&CourseInput::new("Philosophy"))
        .await
        .unwrap();

    let created = client
        .assignments()
        .create(&AssignmentInput {
            title: "Source analysis".to_string(),
            description: None,
            course_id: course.id.clone(),
            due_date: at(12, 9),
            priority: Priority::Low,
        })
        .await
        .unwrap();

    let input = AssignmentInput {
        title: "Source analysis, final".to_string(),
        description: Some("Two primary sources".to_string()),
        course_id: other.id.clone(),
        due_date: timestamp::now() + Duration::days(3),
        priority: Priority::High,
    };
    client
        .assignments()
        .update(&created.id, &input)
        .await
        .unwrap();
    let fetched = client.assignments().get_by_id(&created.id).await.unwrap();

    assert_eq!(fetched.to_input(), input);
    assert_eq!(fetched.course_name.as_deref(), Some("Philosophy"));
}

#[tokio::test]
async fn test_schedule_update_then_get_round_trip() {
    let client = common::signed_in_client().await;
    let course = client
        .courses()
        .create(&CourseInput::new("Biology"))
        .await
        .unwrap();

    let created = client
        .schedules()
        .create(&ScheduleInput {
            title: "Lab".to_string(),
            description: None,
            course_id: None,
            start_time: at(4, 9),
            end_time: at(4, 11),
            day_of_week: None,
            location: None,
        })
        .await
        .unwrap();

    let start = timestamp::now() + Duration::days(2);
    let input = ScheduleInput {
        title: "Lab, section B".to_string(),
        description: Some("Bring goggles".to_string()),
        course_id: Some(course.id.clone()),
        start_time: start,
        end_time: start + Duration::minutes(90),
        day_of_week: Some(DayOfWeek::Wednesday),
        location: Some("Science 204".to_string()),
    };
    client.schedules().update(&created.id, &input).await.unwrap();
    let fetched = client.schedules().get_by_id(&created.id).await.unwrap();

    assert_eq!(fetched.to_input(), input);
}

#[tokio::test]
async fn test_toggle_twice_returns_opposite_states() {
    let client = common::signed_in_client().await;
    let course = client
        .courses()
        .create(&CourseInput::new("Chemistry"))
        .await
        .unwrap();

    let assignment = client
        .assignments()
        .create(&AssignmentInput {
            title: "Titration lab".to_string(),
            description: None,
            course_id: course.id.clone(),
            due_date: at(10, 17),
            priority: Priority::High,
        })
        .await
        .unwrap();
    assert!(!assignment.completed);
    assert_eq!(assignment.course_name.as_deref(), Some("Chemistry"));

    let first = client
        .assignments()
        .toggle_complete(&assignment.id)
        .await
        .unwrap();
    let second = client
        .assignments()
        .toggle_complete(&assignment.id)
        .await
        .unwrap();

    assert_ne!(first.completed, second.completed);
    assert!(first.completed);
}

#[tokio::test]
async fn test_update_does_not_touch_completed() {
    let client = common::signed_in_client().await;
    let course = client.courses().create(&CourseInput::new("Art")).await.unwrap();
    let input = AssignmentInput {
        title: "Sketchbook".to_string(),
        description: None,
        course_id: course.id.clone(),
        due_date: at(5, 9),
        priority: Priority::Low,
    };

    let assignment = client.assignments().create(&input).await.unwrap();
    client
        .assignments()
        .toggle_complete(&assignment.id)
        .await
        .unwrap();

    let updated = client
        .assignments()
        .update(
            &assignment.id,
            &AssignmentInput {
                title: "Sketchbook, part 2".to_string(),
                ..input
            },
        )
        .await
        .unwrap();
    assert!(updated.completed);
}

#[tokio::test]
async fn test_unknown_id_is_not_found() {
    let client = common::signed_in_client().await;

    let err = client.schedules().get_by_id("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.detail(), Some("Schedule not found"));
}

#[tokio::test]
async fn test_entities_are_scoped_per_user() {
    let anonymous = common::start_server().await;
    let alice = common::sign_in(&anonymous, "alice@example.com").await;
    let bob = common::sign_in(&anonymous, "bob@example.com").await;

    let course = alice
        .courses()
        .create(&CourseInput::new("Alice's course"))
        .await
        .unwrap();

    assert!(bob.courses().list_all().await.unwrap().is_empty());
    assert!(bob.courses().get_by_id(&course.id).await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_schedule_with_inverted_range_is_stored() {
    let client = common::signed_in_client().await;

    let schedule = client
        .schedules()
        .create(&ScheduleInput {
            title: "Backwards".to_string(),
            description: None,
            course_id: None,
            start_time: at(3, 12),
            end_time: at(3, 12) - Duration::hours(1),
            day_of_week: None,
            location: None,
        })
        .await
        .unwrap();

    assert!(schedule.end_time < schedule.start_time);
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client =
        studyplan::ApiClient::new("http://127.0.0.1:9", Session::bearer("t")).unwrap();

    let err = client.courses().list_all().await.unwrap_err();
    assert!(err.is_network());
    assert_eq!(err.detail(), None);
}

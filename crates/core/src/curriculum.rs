//! The predefined first week of the roadmap.

use chrono::{DateTime, Utc};

use crate::model::{Task, TaskDraft, TaskId, WeekData};

/// Start of the seed week (2026-01-01T00:00:00Z).
pub const SEED_START_TIMESTAMP: i64 = 1_767_225_600;

struct SeedTask {
    id: &'static str,
    title: &'static str,
    time_estimate: &'static str,
    link: Option<&'static str>,
    motivational_line: Option<&'static str>,
    day: u8,
}

const SEED_TASKS: [SeedTask; 11] = [
    SeedTask {
        id: "day1-task1",
        title: "Install Next.js and create your first app",
        time_estimate: "1-2 hours",
        link: Some("https://nextjs.org/learn"),
        motivational_line: Some("\"Every expert was once a beginner – start strong!\""),
        day: 1,
    },
    SeedTask {
        id: "day1-task2",
        title: "Complete first section of Next.js Learn course",
        time_estimate: "2-3 hours",
        link: Some("https://nextjs.org/learn"),
        motivational_line: None,
        day: 1,
    },
    SeedTask {
        id: "day2-task1",
        title: "Learn routing and layouts",
        time_estimate: "1-2 hours",
        link: None,
        motivational_line: None,
        day: 2,
    },
    SeedTask {
        id: "day2-task2",
        title: "Add navigation to sample site",
        time_estimate: "1 hour",
        link: None,
        motivational_line: None,
        day: 2,
    },
    SeedTask {
        id: "day3-task1",
        title: "Images and fonts optimization",
        time_estimate: "1-2 hours",
        link: Some("https://nextjs.org/docs/basic-features/image-optimization"),
        motivational_line: None,
        day: 3,
    },
    SeedTask {
        id: "day3-task2",
        title: "Deploy to Vercel",
        time_estimate: "30-45 minutes",
        link: Some("https://vercel.com"),
        motivational_line: None,
        day: 3,
    },
    SeedTask {
        id: "day4-task1",
        title: "Build simple static site (portfolio v1) - Part 1",
        time_estimate: "2-3 hours",
        link: None,
        motivational_line: None,
        day: 4,
    },
    SeedTask {
        id: "day5-task1",
        title: "Build simple static site (portfolio v1) - Part 2",
        time_estimate: "2-3 hours",
        link: None,
        motivational_line: None,
        day: 5,
    },
    SeedTask {
        id: "day5-task2",
        title: "Review code and commit to GitHub",
        time_estimate: "1 hour",
        link: None,
        motivational_line: None,
        day: 5,
    },
    SeedTask {
        id: "day6-task1",
        title: "Watch Jack Herrington's Next.js 15 Crash Course",
        time_estimate: "2-3 hours",
        link: Some("https://www.youtube.com/results?search_query=Jack+Herrington+Next.js+15"),
        motivational_line: None,
        day: 6,
    },
    SeedTask {
        id: "day7-task1",
        title: "Rest and review completed work",
        time_estimate: "1-2 hours",
        link: None,
        motivational_line: Some("\"Code 1-2 hours daily: Consistency beats intensity.\""),
        day: 7,
    },
];

/// Start date of the seed week.
#[must_use]
pub fn seed_start_date() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(SEED_START_TIMESTAMP, 0).unwrap_or_default()
}

/// Week 1 of phase 1 with every predefined task open and hour caches filled.
#[must_use]
pub fn seed_week() -> WeekData {
    let tasks = SEED_TASKS
        .iter()
        .map(|seed| {
            Task::from_persisted(TaskDraft {
                id: TaskId::new(seed.id),
                title: seed.title.to_owned(),
                completed: false,
                time_estimate: seed.time_estimate.to_owned(),
                link: seed.link.map(str::to_owned),
                motivational_line: seed.motivational_line.map(str::to_owned),
                day: seed.day,
            })
        })
        .collect();
    let mut week = WeekData::from_persisted(1, 1, seed_start_date(), tasks, 0.0, 0.0);
    week.refresh_hours();
    week
}

//! Seed - デモ用の Fixture を生成
//!
//! タスクの日付は `now` を基準にばらまくので、生成直後に `stats` を
//! 実行すると各バケットに何かしら入ります。

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use veriprop_core::domain::{
    Dispute, DisputeStatus, Message, Payment, PaymentStatus, Task, TaskStatus, User, UserId,
    UserRole, Verification, VerificationStatus,
};
use veriprop_core::ports::IdGenerator;

use crate::fixture::Fixture;

const STREETS: &[&str] = &[
    "Harbour St",
    "Mill Lane",
    "Brook Rd",
    "Station Ave",
    "Orchard Way",
    "Kings Parade",
];

const JOBS: &[&str] = &[
    "Exterior survey",
    "Title document check",
    "Roof inspection",
    "Boundary walk",
    "Utility meter photos",
    "Occupancy visit",
];

pub struct SeedPlan {
    pub tasks: usize,
    pub verifiers: usize,
    pub clients: usize,
}

pub fn generate<R: Rng>(plan: &SeedPlan, ids: &impl IdGenerator, rng: &mut R, now: DateTime<Utc>) -> Fixture {
    let mut fixture = Fixture::default();

    let admin = User::new(ids.generate(), "Admin", "admin@veriprop.test", UserRole::Admin);
    fixture.users.push(admin);

    let verifiers: Vec<UserId> = (0..plan.verifiers.max(1))
        .map(|i| {
            let user = User::new(
                ids.generate(),
                format!("Verifier {}", i + 1),
                format!("verifier{}@veriprop.test", i + 1),
                UserRole::Verifier,
            );
            let id = user.id;
            fixture.users.push(user);
            id
        })
        .collect();

    let clients: Vec<UserId> = (0..plan.clients.max(1))
        .map(|i| {
            let user = User::new(
                ids.generate(),
                format!("Client {}", i + 1),
                format!("client{}@veriprop.test", i + 1),
                UserRole::Client,
            );
            let id = user.id;
            fixture.users.push(user);
            id
        })
        .collect();

    for i in 0..plan.tasks {
        let verifier = verifiers[i % verifiers.len()];
        let client = clients[i % clients.len()];
        let created = now - Duration::hours(rng.gen_range(24..24 * 60));
        let street = STREETS[i % STREETS.len()];

        let verification = Verification::new(
            ids.generate(),
            format!("Verification #{}", i + 1),
            format!("{} {}", rng.gen_range(1..200), street),
            client,
            created,
        )
        .assigned_to(verifier)
        .with_status(pick(
            rng,
            &[
                VerificationStatus::Pending,
                VerificationStatus::InReview,
                VerificationStatus::Verified,
            ],
        ));

        let status = pick(rng, &TaskStatus::ALL);
        let assigned = created + Duration::hours(rng.gen_range(1..12));
        let due = match status {
            TaskStatus::Overdue => now - Duration::hours(rng.gen_range(1..72)),
            TaskStatus::Completed => assigned + Duration::hours(rng.gen_range(4..96)),
            _ => now + Duration::hours(rng.gen_range(-12..96)),
        };

        let task = Task::new(ids.generate(), JOBS[i % JOBS.len()], verifier, created)
            .with_status(status)
            .with_description(format!("{} at {}", JOBS[i % JOBS.len()], verification.property_address))
            .with_verification(verification.id)
            .with_dates(Some(assigned), Some(due));

        if status == TaskStatus::Completed {
            let payment = Payment::new(
                ids.generate(),
                format!("Fee for {}", verification.title),
                rng.gen_range(50..500) * 100,
                client,
                due,
            )
            .with_payee(verifier)
            .with_status(PaymentStatus::Completed);
            fixture.payments.push(payment);

            if rng.gen_bool(0.2) {
                let dispute = Dispute::new(
                    ids.generate(),
                    "Report incomplete",
                    task.id,
                    client,
                    due + Duration::hours(6),
                )
                .with_description("Some rooms are missing from the photo set")
                .with_status(pick(rng, &[DisputeStatus::Open, DisputeStatus::UnderReview]));
                fixture.disputes.push(dispute);
            }
        }

        let mut message = Message::new(
            ids.generate(),
            client,
            verifier,
            format!("Access details for {}", verification.property_address),
            created + Duration::minutes(30),
        )
        .with_subject(verification.title.clone());
        if rng.gen_bool(0.5) {
            message = message.mark_read();
        }
        fixture.messages.push(message);

        fixture.verifications.push(verification);
        fixture.tasks.push(task);
    }

    tracing::info!(
        users = fixture.users.len(),
        tasks = fixture.tasks.len(),
        payments = fixture.payments.len(),
        disputes = fixture.disputes.len(),
        "fixture generated"
    );
    fixture
}

fn pick<T: Copy, R: Rng>(rng: &mut R, options: &[T]) -> T {
    options[rng.gen_range(0..options.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use veriprop_core::ports::{FixedClock, UlidGenerator};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn generates_the_requested_shape() {
        let ids = UlidGenerator::new(FixedClock::new(now()));
        let mut rng = StdRng::seed_from_u64(7);
        let plan = SeedPlan {
            tasks: 30,
            verifiers: 3,
            clients: 2,
        };

        let fixture = generate(&plan, &ids, &mut rng, now());

        assert_eq!(fixture.users.len(), 1 + 3 + 2);
        assert_eq!(fixture.tasks.len(), 30);
        assert_eq!(fixture.verifications.len(), 30);
        assert_eq!(fixture.messages.len(), 30);
        let completed = fixture
            .tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Completed)
            .count();
        assert_eq!(fixture.payments.len(), completed);
    }

    #[test]
    fn tasks_are_spread_across_verifiers() {
        let ids = UlidGenerator::new(FixedClock::new(now()));
        let mut rng = StdRng::seed_from_u64(1);
        let plan = SeedPlan {
            tasks: 9,
            verifiers: 3,
            clients: 1,
        };

        let fixture = generate(&plan, &ids, &mut rng, now());
        let verifiers: Vec<UserId> = fixture
            .users
            .iter()
            .filter(|u| u.role == UserRole::Verifier)
            .map(|u| u.id)
            .collect();
        for v in verifiers {
            assert_eq!(fixture.tasks.iter().filter(|t| t.verifier_id == v).count(), 3);
        }
    }

    #[test]
    fn overdue_tasks_are_past_due() {
        let ids = UlidGenerator::new(FixedClock::new(now()));
        let mut rng = StdRng::seed_from_u64(42);
        let plan = SeedPlan {
            tasks: 60,
            verifiers: 2,
            clients: 2,
        };

        let fixture = generate(&plan, &ids, &mut rng, now());
        assert!(
            fixture
                .tasks
                .iter()
                .filter(|t| t.status == TaskStatus::Overdue)
                .all(|t| t.date_due.is_some_and(|d| d < now()))
        );
    }
}

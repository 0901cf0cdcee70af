//! Fixed seed dataset used on startup and by reset

/// A seed record with a fixed id
#[derive(Debug, Clone, Copy)]
pub struct SeedEmail {
    pub id: i64,
    pub sender: &'static str,
    pub recipient: &'static str,
    pub subject: &'static str,
    pub body: &'static str,
    pub read: bool,
}

pub const SEED_EMAILS: [SeedEmail; 6] = [
    SeedEmail {
        id: 1,
        sender: "eric@work.com",
        recipient: "you@email.com",
        subject: "Happy Hour",
        body: "We're planning drinks this Friday!",
        read: false,
    },
    SeedEmail {
        id: 2,
        sender: "boss@email.com",
        recipient: "you@email.com",
        subject: "Q3 Report Review",
        body: "Please review the Q3 report and send me your feedback by EOD.",
        read: false,
    },
    SeedEmail {
        id: 3,
        sender: "alice@work.com",
        recipient: "you@email.com",
        subject: "Lunch Tomorrow?",
        body: "Hey! Want to grab lunch tomorrow? I was thinking that new Thai place.",
        read: false,
    },
    SeedEmail {
        id: 4,
        sender: "newsletter@techdigest.com",
        recipient: "you@email.com",
        subject: "Weekly Tech Digest",
        body: "This week in tech: AI breakthroughs, new gadgets, and more...",
        read: true,
    },
    SeedEmail {
        id: 5,
        sender: "boss@email.com",
        recipient: "you@email.com",
        subject: "Team Meeting Monday",
        body: "Reminder: Team meeting at 10 AM Monday. Please prepare your updates.",
        read: false,
    },
    SeedEmail {
        id: 6,
        sender: "hr@company.com",
        recipient: "you@email.com",
        subject: "Benefits Enrollment Reminder",
        body: "Open enrollment ends next Friday. Don't forget to update your benefits.",
        read: true,
    },
];

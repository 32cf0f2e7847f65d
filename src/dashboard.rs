use serde::Serialize;

pub const WATER_GOAL: u8 = 10;
pub const STREAK_GOAL: u8 = 7;
pub const ACTIVITY_STEP: u8 = 5;
pub const WEIGHT_TICK_STEP: f64 = 0.01;

/// One clickable activity card. Progress moves in fixed steps and the
/// completion callback fires on the step that first lands on 100.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityCard {
    pub slug: String,
    pub title: String,
    pub current: String,
    pub target: String,
    pub progress: u8,
}

impl ActivityCard {
    pub fn new(
        slug: impl Into<String>,
        title: impl Into<String>,
        current: impl Into<String>,
        target: impl Into<String>,
        progress: u8,
    ) -> Self {
        Self {
            slug: slug.into(),
            title: title.into(),
            current: current.into(),
            target: target.into(),
            progress: progress.min(100),
        }
    }

    /// Advances by one step, clamped at 100. `on_complete` runs only when
    /// this call is the one that reaches 100; a card already at 100 is inert.
    pub fn advance(&mut self, mut on_complete: impl FnMut()) {
        if self.progress >= 100 {
            return;
        }
        self.progress = (self.progress + ACTIVITY_STEP).min(100);
        if self.progress == 100 {
            on_complete();
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ActivityAdvance {
    pub progress: u8,
    pub completed: bool,
}

/// All cross-widget dashboard state. Counters only move through the
/// methods below, which clamp at their bounds instead of overflowing.
#[derive(Debug)]
pub struct Dashboard {
    profile_image: Option<String>,
    water_count: u8,
    weight_loss_pct: f64,
    week_streak: u8,
    cards: Vec<ActivityCard>,
}

impl Dashboard {
    pub fn new() -> Self {
        Self::with_values(2, 3.0, 3, default_cards())
    }

    pub fn with_values(
        water_count: u8,
        weight_loss_pct: f64,
        week_streak: u8,
        cards: Vec<ActivityCard>,
    ) -> Self {
        Self {
            profile_image: None,
            water_count: water_count.min(WATER_GOAL),
            weight_loss_pct: weight_loss_pct.clamp(0.0, 100.0),
            week_streak: week_streak.min(STREAK_GOAL),
            cards,
        }
    }

    pub fn water_count(&self) -> u8 {
        self.water_count
    }

    pub fn weight_loss_pct(&self) -> f64 {
        self.weight_loss_pct
    }

    pub fn week_streak(&self) -> u8 {
        self.week_streak
    }

    pub fn cards(&self) -> &[ActivityCard] {
        &self.cards
    }

    pub fn profile_image(&self) -> Option<&str> {
        self.profile_image.as_deref()
    }

    pub fn adopt_profile_image(&mut self, image: String) {
        self.profile_image = Some(image);
    }

    /// Logs one cup. A click while the count sits at 0 is the first sip of
    /// the day and also advances the streak; the count itself is not
    /// date-checked, so draining back to 0 re-arms that bump.
    pub fn add_water(&mut self) {
        if self.water_count >= WATER_GOAL {
            return;
        }
        let first_of_day = self.water_count == 0;
        self.water_count += 1;
        if first_of_day {
            self.advance_streak();
        }
    }

    pub fn sub_water(&mut self) {
        if self.water_count > 0 {
            self.water_count -= 1;
        }
    }

    pub fn advance_streak(&mut self) {
        if self.week_streak < STREAK_GOAL {
            self.week_streak += 1;
        }
    }

    /// One background-timer step of the weight-loss simulation.
    pub fn tick_weight_loss(&mut self) {
        self.weight_loss_pct = (self.weight_loss_pct + WEIGHT_TICK_STEP).min(100.0);
    }

    /// Advances the named card and relays its completion event into the
    /// streak. Returns `None` for a slug no card carries.
    pub fn advance_activity(&mut self, slug: &str) -> Option<ActivityAdvance> {
        let mut completed = false;
        let progress = {
            let card = self.cards.iter_mut().find(|card| card.slug == slug)?;
            card.advance(|| completed = true);
            card.progress
        };
        if completed {
            self.advance_streak();
        }
        Some(ActivityAdvance {
            progress,
            completed,
        })
    }
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

pub fn default_cards() -> Vec<ActivityCard> {
    vec![
        ActivityCard::new(
            "cycling-hero",
            "Cycling Hero",
            "10 km / week",
            "Target: 50km",
            55,
        ),
        ActivityCard::new(
            "daily-running",
            "Daily Running",
            "5 km / week",
            "Target: 7km / week",
            75,
        ),
        ActivityCard::new(
            "daily-steps",
            "Daily Steps",
            "10000 steps / week",
            "Target: 12000/week",
            95,
        ),
    ]
}

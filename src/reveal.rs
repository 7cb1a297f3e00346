use crate::{
    core::Vec2,
    ease::Ease,
    error::{NiteglowError, NiteglowResult},
};

/// What arms a reveal group.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RevealTrigger {
    /// Arms `delay_secs` after the stage starts (the hero intro tweens).
    AfterLoad { delay_secs: f64 },
    /// Arms the first time scroll progress reaches `progress`.
    ScrollDepth { progress: f64 },
}

/// One group of staggered reveal targets (a selector's matches on the
/// original page). Members animate from the hidden pose to rest, offset by
/// `stagger_secs` each, and never reverse once armed.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RevealGroup {
    pub name: String,
    pub trigger: RevealTrigger,
    pub members: usize,
    pub stagger_secs: f64,
    pub duration_secs: f64,
    pub ease: Ease,
    /// Offset the hidden pose starts from; rest is zero offset, opacity 1.
    pub hidden_offset: Vec2,
}

impl RevealGroup {
    pub fn validate(&self) -> NiteglowResult<()> {
        if self.name.trim().is_empty() {
            return Err(NiteglowError::validation("reveal group name must be non-empty"));
        }
        if self.members == 0 {
            return Err(NiteglowError::validation(format!(
                "reveal group '{}' must have at least one member",
                self.name
            )));
        }
        if !(self.duration_secs > 0.0) {
            return Err(NiteglowError::validation(format!(
                "reveal group '{}' duration must be > 0",
                self.name
            )));
        }
        if self.stagger_secs < 0.0 {
            return Err(NiteglowError::validation(format!(
                "reveal group '{}' stagger must be >= 0",
                self.name
            )));
        }
        match self.trigger {
            RevealTrigger::AfterLoad { delay_secs } => {
                if delay_secs < 0.0 {
                    return Err(NiteglowError::validation(format!(
                        "reveal group '{}' delay must be >= 0",
                        self.name
                    )));
                }
            }
            RevealTrigger::ScrollDepth { progress } => {
                if !(0.0..=1.0).contains(&progress) {
                    return Err(NiteglowError::validation(format!(
                        "reveal group '{}' scroll threshold must be in 0..=1",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// The style a member should display this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealStyle {
    pub opacity: f64,
    pub offset: Vec2,
}

impl RevealStyle {
    pub fn is_resting(&self) -> bool {
        self.opacity >= 1.0 && self.offset == Vec2::ZERO
    }
}

struct GroupState {
    spec: RevealGroup,
    /// Stage clock at which the group armed; `None` until the trigger fires.
    armed_at: Option<f64>,
}

/// Drives all reveal groups against the stage clock. Fire-once: a group
/// that armed stays armed no matter where the scroll goes afterwards.
pub struct RevealRunner {
    groups: Vec<GroupState>,
    clock: f64,
}

impl RevealRunner {
    pub fn new(groups: Vec<RevealGroup>) -> NiteglowResult<Self> {
        for g in &groups {
            g.validate()?;
        }
        let groups = groups
            .into_iter()
            .map(|spec| {
                // Load-triggered groups are armed from the start; the delay
                // is folded into their start time.
                let armed_at = match spec.trigger {
                    RevealTrigger::AfterLoad { delay_secs } => Some(delay_secs),
                    RevealTrigger::ScrollDepth { .. } => None,
                };
                GroupState { spec, armed_at }
            })
            .collect();
        Ok(Self { groups, clock: 0.0 })
    }

    pub fn advance(&mut self, dt: f64, scroll_progress: f64) {
        self.clock += dt.max(0.0);
        for g in &mut self.groups {
            if g.armed_at.is_some() {
                continue;
            }
            if let RevealTrigger::ScrollDepth { progress } = g.spec.trigger
                && scroll_progress >= progress
            {
                g.armed_at = Some(self.clock);
            }
        }
    }

    /// Style for one member, or `None` for an unknown group or member
    /// index (the missing-element skip of the original page).
    pub fn style(&self, group: &str, member: usize) -> Option<RevealStyle> {
        let g = self.groups.iter().find(|g| g.spec.name == group)?;
        if member >= g.spec.members {
            return None;
        }

        let Some(armed_at) = g.armed_at else {
            return Some(RevealStyle {
                opacity: 0.0,
                offset: g.spec.hidden_offset,
            });
        };

        let start = armed_at + member as f64 * g.spec.stagger_secs;
        let t = ((self.clock - start) / g.spec.duration_secs).clamp(0.0, 1.0);
        let e = g.spec.ease.apply(t);
        Some(RevealStyle {
            opacity: e,
            offset: g.spec.hidden_offset * (1.0 - e),
        })
    }

    pub fn is_armed(&self, group: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.spec.name == group && g.armed_at.is_some())
    }

    /// True once every member of the group has reached the resting pose.
    pub fn is_settled(&self, group: &str) -> bool {
        let Some(g) = self.groups.iter().find(|g| g.spec.name == group) else {
            return false;
        };
        (0..g.spec.members).all(|m| {
            self.style(group, m)
                .is_some_and(|s| s.is_resting())
        })
    }
}

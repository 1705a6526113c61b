use yew::prelude::*;

use crate::components::counter::Counter;
use crate::config;
use crate::reveal::easing::Easing;
use crate::reveal::parser::RawValue;

/// One statistic in a grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Stat {
    pub value: &'static str,
    pub label: &'static str,
    pub prefix: &'static str,
    pub suffix: &'static str,
    pub description: Option<&'static str>,
    pub trend: Option<&'static str>,
}

impl Stat {
    pub const fn new(value: &'static str, label: &'static str) -> Self {
        Self {
            value,
            label,
            prefix: "",
            suffix: "",
            description: None,
            trend: None,
        }
    }

    pub const fn prefix(mut self, prefix: &'static str) -> Self {
        self.prefix = prefix;
        self
    }

    pub const fn suffix(mut self, suffix: &'static str) -> Self {
        self.suffix = suffix;
        self
    }

    pub const fn description(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }

    pub const fn trend(mut self, trend: &'static str) -> Self {
        self.trend = Some(trend);
        self
    }
}

/// Start delay of the counter at `index` when each one waits `stagger_ms`
/// longer than the one before it.
pub fn stagger_delay(index: usize, stagger_ms: u32) -> u32 {
    u32::try_from(index).unwrap_or(u32::MAX).saturating_mul(stagger_ms)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridVariant {
    Card,
    Gradient,
    Minimal,
}

impl GridVariant {
    fn class(self) -> &'static str {
        match self {
            GridVariant::Card => "stats-grid-card",
            GridVariant::Gradient => "stats-grid-gradient",
            GridVariant::Minimal => "stats-grid-minimal",
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct StatsGridProps {
    pub stats: &'static [Stat],
    #[prop_or(config::STAT_STAGGER_MS)]
    pub stagger_ms: u32,
    #[prop_or(GridVariant::Card)]
    pub variant: GridVariant,
    #[prop_or(Easing::OUT_EXPO)]
    pub easing: Easing,
}

#[function_component(StatsGrid)]
pub fn stats_grid(props: &StatsGridProps) -> Html {
    html! {
        <div class={classes!("stats-grid", props.variant.class())}>
            { for props.stats.iter().enumerate().map(|(index, stat)| html! {
                <div class="stat-cell" key={stat.label}>
                    <Counter
                        value={RawValue::from(stat.value)}
                        label={stat.label}
                        prefix={stat.prefix}
                        suffix={stat.suffix}
                        start_delay_ms={stagger_delay(index, props.stagger_ms)}
                        easing={props.easing}
                    />
                    {
                        match stat.description {
                            Some(description) => html! { <p class="stat-description">{description}</p> },
                            None => html! {},
                        }
                    }
                    {
                        match stat.trend {
                            Some(trend) => html! { <span class="stat-trend">{trend}</span> },
                            None => html! {},
                        }
                    }
                </div>
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delays_grow_with_position() {
        let delays: Vec<u32> = (0..4).map(|i| stagger_delay(i, 300)).collect();
        assert_eq!(delays, [0, 300, 600, 900]);
        assert_eq!(stagger_delay(3, 0), 0);
    }

    #[test]
    fn delays_saturate() {
        assert_eq!(stagger_delay(usize::MAX, 200), u32::MAX);
        assert_eq!(stagger_delay(50_000_000, 200), u32::MAX);
    }

    #[test]
    fn builder_fills_optional_parts() {
        let stat = Stat::new("99.9", "Uptime").suffix("%").description("Platform reliability");
        assert_eq!(stat.suffix, "%");
        assert_eq!(stat.prefix, "");
        assert_eq!(stat.description, Some("Platform reliability"));
        assert_eq!(stat.trend, None);
    }
}

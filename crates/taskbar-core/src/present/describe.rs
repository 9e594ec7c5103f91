use taskbar_model::{
    Attribute, ConfigValue, IndicatorColor, IndicatorCommand, IndicatorDescriptor, IndicatorLook,
    RunState, RuntimeTask, UnmatchedPolicy,
};

use crate::attrs::AttributeResolver;
use crate::config::EngineConfig;
use crate::matcher::MatchReport;
use crate::resolve::EffectiveTaskView;

/// Turns a matching outcome into the ordered list of desired indicators.
pub struct DescriptorBuilder<'a> {
    attrs: AttributeResolver<'a>,
    config: &'a EngineConfig,
}

impl<'a> DescriptorBuilder<'a> {
    pub fn new(attrs: AttributeResolver<'a>, config: &'a EngineConfig) -> Self {
        Self { attrs, config }
    }

    /// Task indicators in declaration order, orphans after them under `showAll`, then the overflow selector when there is
    /// at least one task indicator.
    pub fn build(&self, report: &MatchReport) -> Vec<IndicatorDescriptor> {
        let mut out: Vec<IndicatorDescriptor> = report
            .pairs
            .iter()
            .map(|pair| (Some(&pair.view), &pair.task))
            .chain(
                report
                    .orphans
                    .iter()
                    .filter(|_| self.config.unmatched_policy == UnmatchedPolicy::ShowAll)
                    .filter(|task| !self.attrs.is_orphan_hidden(task))
                    .map(|task| (None, task)),
            )
            .enumerate()
            .map(|(index, (view, task))| self.describe(index, view, task))
            .collect();

        if !out.is_empty() {
            out.push(IndicatorDescriptor::selector(IndicatorLook {
                tooltip: self.config.overflow_tooltip.clone(),
                ..IndicatorLook::text(self.config.overflow_text.as_str())
            }));
        }
        out
    }

    fn describe(
        &self,
        index: usize,
        view: Option<&EffectiveTaskView>,
        task: &RuntimeTask,
    ) -> IndicatorDescriptor {
        IndicatorDescriptor {
            idle: self.look(view, task, RunState::Idle),
            running: self.look(view, task, RunState::Running),
            file_pattern: self
                .attrs
                .text(view, Some(task), RunState::Idle, Attribute::FilePattern)
                .filter(|p| !p.is_empty()),
            command: IndicatorCommand::Run { index },
            task: Some(task.clone()),
        }
    }

    fn look(
        &self,
        view: Option<&EffectiveTaskView>,
        task: &RuntimeTask,
        state: RunState,
    ) -> IndicatorLook {
        let text = |attr| self.attrs.text(view, Some(task), state, attr);
        let color = |attr| text(attr).as_deref().and_then(IndicatorColor::parse);

        let label = text(Attribute::Label).unwrap_or_else(|| task.name.clone());
        let icon = self
            .attrs
            .resolve(view, Some(task), state, Attribute::Icon)
            .as_ref()
            .and_then(icon_id)
            .map(|id| format!("$({id}) "))
            .unwrap_or_default();

        IndicatorLook {
            text: format!("{icon}{label}"),
            tooltip: text(Attribute::Detail),
            color: color(Attribute::Color),
            background: color(Attribute::BackgroundColor),
        }
    }
}

/// Icon id: a string, or an object's `id`.
fn icon_id(value: &ConfigValue) -> Option<&str> {
    let id = match value {
        ConfigValue::String(s) => s.as_str(),
        ConfigValue::Map(m) => m.get("id").and_then(ConfigValue::as_str)?,
        _ => return None,
    };
    (!id.is_empty()).then_some(id)
}

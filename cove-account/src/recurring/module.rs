//! The recurring-swap module implementation.

use cove_core::{Selector, U256};

use crate::error::ModuleError;
use crate::modules::{AccountModule, CapabilitySet, CodeUnit, ModuleContext};
use crate::state::AccountEvent;

use super::settings::{RecurringConfig, RecurringSettings};

/// Namespace key the settings live under.
const SETTINGS_KEY: &[u8] = b"settings";

/// Selector of the permissionless trigger action.
pub fn trigger_selector() -> Selector {
    Selector::from_name("trigger-swap")
}

/// Selector of the read-only settings accessor.
pub fn settings_selector() -> Selector {
    Selector::from_name("recurring-settings")
}

/// Scheduled, idempotent recurring swap against an external venue.
///
/// Install grants the venue an unlimited allowance over the input asset;
/// uninstall resets it to zero. The trigger executes at most once per
/// period inside the configured window, jumping over missed periods
/// rather than catching them up.
pub struct RecurringSwapModule;

impl RecurringSwapModule {
    fn read_settings(ctx: &ModuleContext<'_>) -> Result<RecurringSettings, ModuleError> {
        let bytes = ctx.storage_get(SETTINGS_KEY).ok_or(ModuleError::StateMissing)?;
        RecurringSettings::decode(bytes)
    }

    fn trigger(&self, ctx: &mut ModuleContext<'_>) -> Result<Vec<u8>, ModuleError> {
        let mut settings = Self::read_settings(ctx)?;
        let now = ctx.timestamp();

        // Covers too-early, too-late, and already-executed alike.
        if now < settings.window_start || now > settings.window_end {
            return Err(ModuleError::NotAllowed);
        }
        let current_period = settings.current_period(now);
        if current_period <= settings.last_period_executed {
            return Err(ModuleError::NotAllowed);
        }

        // A jump, not an increment: missed periods are skipped for good.
        settings.last_period_executed = current_period;
        ctx.storage_put(SETTINGS_KEY, settings.encode());
        ctx.emit(AccountEvent::SwapTriggered {
            module: ctx.module_id(),
            period: current_period,
            input_asset: settings.input_asset,
            output_asset: settings.output_asset,
            amount_in: settings.amount_per_period,
        });

        let account = ctx.account();
        let amount_out = ctx.host().swap(
            &settings.venue,
            &account,
            &settings.input_asset,
            &settings.output_asset,
            settings.amount_per_period,
        )?;

        tracing::info!(
            period = current_period,
            amount_out = %amount_out,
            "recurring swap triggered"
        );
        Ok(cove_core::serialization::serialize(&amount_out)
            .expect("amount serialization should not fail"))
    }
}

impl CodeUnit for RecurringSwapModule {
    fn name(&self) -> &'static str {
        "recurring-swap"
    }

    fn capabilities(&self) -> Option<CapabilitySet> {
        Some(CapabilitySet::INTROSPECTION.union(CapabilitySet::MODULE))
    }

    fn as_module(&self) -> Option<&dyn AccountModule> {
        Some(self)
    }
}

impl AccountModule for RecurringSwapModule {
    fn selectors(&self) -> Vec<Selector> {
        vec![trigger_selector(), settings_selector()]
    }

    fn on_install(
        &self,
        ctx: &mut ModuleContext<'_>,
        init_payload: &[u8],
    ) -> Result<(), ModuleError> {
        let config: RecurringConfig = cove_core::serialization::deserialize(init_payload)
            .map_err(|e| ModuleError::MalformedPayload(e.to_string()))?;
        config.validate(ctx.timestamp())?;

        let settings = RecurringSettings::from_config(&config);
        ctx.storage_put(SETTINGS_KEY, settings.encode());

        // Outbound approval is the final step of a successful install.
        let account = ctx.account();
        ctx.host()
            .approve(&config.input_asset, &account, &config.venue, U256::MAX)?;
        Ok(())
    }

    fn on_uninstall(&self, ctx: &mut ModuleContext<'_>) -> Result<(), ModuleError> {
        let settings = Self::read_settings(ctx)?;
        let account = ctx.account();
        ctx.host().approve(
            &settings.input_asset,
            &account,
            &settings.venue,
            U256::zero(),
        )?;
        Ok(())
    }

    fn handle(
        &self,
        ctx: &mut ModuleContext<'_>,
        selector: Selector,
        _args: &[u8],
    ) -> Result<Vec<u8>, ModuleError> {
        if selector == trigger_selector() {
            self.trigger(ctx)
        } else if selector == settings_selector() {
            Ok(Self::read_settings(ctx)?.encode())
        } else {
            // The dispatcher only routes selectors this module declared.
            Err(ModuleError::MalformedPayload(format!(
                "selector {} not implemented",
                selector
            )))
        }
    }
}

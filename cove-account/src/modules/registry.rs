//! Module installation, removal, and call dispatch.
//!
//! All three entry points apply their changes to a working copy of the
//! account state and commit only on success, so a failing hook or handler
//! leaves no partial effect.

use cove_core::Selector;

use crate::error::{AccountError, AccountResult, UnsupportedReason};
use crate::execute::CallContext;
use crate::host::Host;
use crate::state::{AccountEvent, AccountState};

use super::{AccountModule, CapabilitySet, CodeUnit, ModuleCatalog, ModuleContext};

/// Install a module onto the account. Executor-only.
///
/// Probes the unit's capabilities, rejects duplicate installs and selector
/// collisions before running any module code, then runs the install hook
/// in the account's storage context. The whole install is atomic: a hook
/// failure or collision installs nothing.
pub fn install_module(
    state: &mut AccountState,
    catalog: &ModuleCatalog,
    host: &mut dyn Host,
    ctx: &CallContext,
    module_id: [u8; 20],
    init_payload: &[u8],
) -> AccountResult<()> {
    require_executor(state, ctx)?;

    if state.installed.contains(&module_id) {
        return Err(AccountError::ModuleAlreadyInstalled { module: module_id });
    }

    let module = probe_module(catalog, &module_id)?;

    let selectors = module.selectors();
    for selector in &selectors {
        if let Some(owner) = state.selector_table.get(selector) {
            return Err(AccountError::SelectorInUse {
                selector: *selector,
                owner: *owner,
            });
        }
    }

    let mut working = state.clone();
    {
        let mut module_ctx =
            ModuleContext::new(&mut working, host, module_id, ctx.caller, ctx.timestamp);
        module
            .on_install(&mut module_ctx, init_payload)
            .map_err(|reason| AccountError::InstallFailed {
                module: module_id,
                reason,
            })?;
    }

    for selector in selectors {
        working.selector_table.insert(selector, module_id);
    }
    working.installed.insert(module_id);
    working.record(AccountEvent::ModuleInstalled { module: module_id });

    tracing::info!(module = %hex::encode(module_id), "module installed");
    *state = working;
    Ok(())
}

/// Uninstall a module from the account. Executor-only.
///
/// Runs the uninstall hook first (a failure aborts the whole uninstall),
/// then removes every selector the module owns, drops its namespace, and
/// removes it from the installed set together.
pub fn uninstall_module(
    state: &mut AccountState,
    catalog: &ModuleCatalog,
    host: &mut dyn Host,
    ctx: &CallContext,
    module_id: [u8; 20],
) -> AccountResult<()> {
    require_executor(state, ctx)?;

    if !state.installed.contains(&module_id) {
        return Err(AccountError::ModuleNotInstalled { module: module_id });
    }

    let module = probe_module(catalog, &module_id)?;

    let mut working = state.clone();
    {
        let mut module_ctx =
            ModuleContext::new(&mut working, host, module_id, ctx.caller, ctx.timestamp);
        module
            .on_uninstall(&mut module_ctx)
            .map_err(|reason| AccountError::Module {
                module: module_id,
                reason,
            })?;
    }

    working.selector_table.retain(|_, owner| *owner != module_id);
    working.installed.remove(&module_id);
    working.storage.clear(&module_id);
    working.record(AccountEvent::ModuleUninstalled { module: module_id });

    tracing::info!(module = %hex::encode(module_id), "module uninstalled");
    *state = working;
    Ok(())
}

/// Dispatch a call to the module owning a selector. Permissionless.
///
/// A selector no installed module owns is a hard failure, never a silent
/// no-op. Module results and failures propagate transparently.
pub fn dispatch_call(
    state: &mut AccountState,
    catalog: &ModuleCatalog,
    host: &mut dyn Host,
    ctx: &CallContext,
    selector: Selector,
    args: &[u8],
) -> AccountResult<Vec<u8>> {
    let module_id = *state
        .selector_table
        .get(&selector)
        .ok_or(AccountError::UnknownSelector { selector })?;
    let module = probe_module(catalog, &module_id)?;

    let mut working = state.clone();
    let result = {
        let mut module_ctx =
            ModuleContext::new(&mut working, host, module_id, ctx.caller, ctx.timestamp);
        module.handle(&mut module_ctx, selector, args)
    };

    match result {
        Ok(output) => {
            tracing::debug!(
                module = %hex::encode(module_id),
                selector = %selector,
                "dispatched call"
            );
            *state = working;
            Ok(output)
        }
        Err(reason) => Err(AccountError::Module {
            module: module_id,
            reason,
        }),
    }
}

/// Resolve a code unit and confirm it can act as a module.
fn probe_module<'a>(
    catalog: &'a ModuleCatalog,
    module_id: &[u8; 20],
) -> AccountResult<&'a dyn AccountModule> {
    let unit: &dyn CodeUnit = catalog
        .get(module_id)
        .ok_or(AccountError::UnknownCodeUnit { module: *module_id })?;

    let capabilities = unit
        .capabilities()
        .ok_or(AccountError::UnsupportedModule {
            module: *module_id,
            reason: UnsupportedReason::MissingIntrospection,
        })?;

    if !capabilities.contains(CapabilitySet::MODULE) {
        return Err(AccountError::UnsupportedModule {
            module: *module_id,
            reason: UnsupportedReason::NotAModule,
        });
    }

    unit.as_module().ok_or(AccountError::UnsupportedModule {
        module: *module_id,
        reason: UnsupportedReason::NotAModule,
    })
}

fn require_executor(state: &AccountState, ctx: &CallContext) -> AccountResult<()> {
    if ctx.caller != state.executor {
        return Err(AccountError::UnauthorizedCaller {
            expected: state.executor,
            actual: ctx.caller,
        });
    }
    Ok(())
}

//! Install and remove actions against a resolved device instance.
//!
//! Every action is attempted exactly once; any failure from the underlying
//! service is terminal and partial state is left to the service to manage.

use std::ptr;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    DIF_REMOVE, DI_NEEDREBOOT, DI_NEEDRESTART, DiInstallDevice, DiUninstallDevice,
    SP_DEVINFO_DATA, SP_DEVINSTALL_PARAMS_W, SP_DRVINFO_DATA_V2_W, SetupDiCallClassInstaller,
    SetupDiGetDeviceInstallParamsW,
};
use windows_sys::Win32::Foundation::{ERROR_CALL_NOT_IMPLEMENTED, ERROR_PROC_NOT_FOUND, FALSE};

use crate::devinfo::DeviceInfoSet;
use crate::win32;

/// Installs the selected class driver for `device`. Returns whether the
/// change needs a reboot to take full effect.
pub fn install(
    set: &DeviceInfoSet,
    device: &mut SP_DEVINFO_DATA,
    driver: &mut SP_DRVINFO_DATA_V2_W,
) -> win32::Result<bool> {
    let mut reboot = FALSE;
    win32::check_bool(unsafe {
        DiInstallDevice(ptr::null_mut(), set.as_raw(), device, driver, 0, &mut reboot)
    })?;
    Ok(reboot != FALSE)
}

/// Removes `device`, preferring the modern uninstall entry point.
///
/// Hosts that predate `DiUninstallDevice` report the call as unavailable;
/// those fall back to the legacy class-installer removal. The fallback is
/// part of the single remove attempt, not a retry of a failed removal.
pub fn remove(set: &DeviceInfoSet, device: &mut SP_DEVINFO_DATA) -> win32::Result<bool> {
    let mut reboot = FALSE;
    let ok = unsafe { DiUninstallDevice(ptr::null_mut(), set.as_raw(), device, 0, &mut reboot) };
    if ok != FALSE {
        return Ok(reboot != FALSE);
    }

    let err = win32::Error::last();
    match err.code() {
        ERROR_CALL_NOT_IMPLEMENTED | ERROR_PROC_NOT_FOUND => remove_legacy(set, device),
        _ => Err(err),
    }
}

fn remove_legacy(set: &DeviceInfoSet, device: &mut SP_DEVINFO_DATA) -> win32::Result<bool> {
    win32::check_bool(unsafe { SetupDiCallClassInstaller(DIF_REMOVE, set.as_raw(), device) })?;
    Ok(needs_reboot(set, device))
}

/// The class-installer path signals reboots through the device install
/// params rather than an out parameter.
fn needs_reboot(set: &DeviceInfoSet, device: &mut SP_DEVINFO_DATA) -> bool {
    let mut params = SP_DEVINSTALL_PARAMS_W {
        cbSize: size_of::<SP_DEVINSTALL_PARAMS_W>() as u32,
        ..Default::default()
    };
    let ok = unsafe { SetupDiGetDeviceInstallParamsW(set.as_raw(), device, &mut params) };
    ok != FALSE && params.Flags & (DI_NEEDREBOOT | DI_NEEDRESTART) != 0
}

//! Device-instance resolution through the SetupAPI device information set.

use std::ptr;
use windows_sys::Win32::Devices::DeviceAndDriverInstallation::{
    DIGCF_ALLCLASSES, DIGCF_PRESENT, HDEVINFO, SP_DEVINFO_DATA, SP_DRVINFO_DATA_V2_W,
    SetupDiDestroyDeviceInfoList, SetupDiEnumDeviceInfo, SetupDiGetClassDevsExW,
    SetupDiGetSelectedDriverW,
};
use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
use windows_sys::core::GUID;

use crate::args::Mode;
use crate::win32;

/// An owned `HDEVINFO` device information set.
///
/// The raw SetupAPI handle has no ownership semantics of its own; wrapping
/// it guarantees `SetupDiDestroyDeviceInfoList` runs on every exit path.
pub struct DeviceInfoSet(HDEVINFO);

impl DeviceInfoSet {
    /// Opens the set of device instances for `class`.
    ///
    /// Remove mode restricts the set to devices currently present in the
    /// system. Install mode opens all configured classes instead, since a
    /// device being installed may not be marked present yet.
    pub fn class_devices(class: &GUID, mode: Mode) -> win32::Result<Self> {
        let flags = match mode {
            Mode::Install => DIGCF_ALLCLASSES,
            Mode::Remove => DIGCF_PRESENT,
        };

        let handle = unsafe {
            SetupDiGetClassDevsExW(
                class,
                ptr::null(),
                ptr::null_mut(),
                flags,
                ptr::null_mut(),
                ptr::null(),
                ptr::null(),
            )
        };
        if handle == INVALID_HANDLE_VALUE {
            return Err(win32::Error::last());
        }
        Ok(DeviceInfoSet(handle))
    }

    /// The device instance at `index`. The workflow only ever asks for
    /// member 0: the first enumerated match wins and multiple matches are
    /// never disambiguated.
    pub fn device(&self, index: u32) -> win32::Result<SP_DEVINFO_DATA> {
        let mut device = SP_DEVINFO_DATA {
            cbSize: size_of::<SP_DEVINFO_DATA>() as u32,
            ..Default::default()
        };
        win32::check_bool(unsafe { SetupDiEnumDeviceInfo(self.0, index, &mut device) })?;
        Ok(device)
    }

    /// The currently selected class driver for `device`. A device freshly
    /// added to the configuration set may not have one bound yet.
    pub fn selected_driver(
        &self,
        device: &mut SP_DEVINFO_DATA,
    ) -> win32::Result<SP_DRVINFO_DATA_V2_W> {
        let mut driver = SP_DRVINFO_DATA_V2_W {
            cbSize: size_of::<SP_DRVINFO_DATA_V2_W>() as u32,
            ..Default::default()
        };
        win32::check_bool(unsafe { SetupDiGetSelectedDriverW(self.0, device, &mut driver) })?;
        Ok(driver)
    }

    pub(crate) fn as_raw(&self) -> HDEVINFO {
        self.0
    }
}

impl Drop for DeviceInfoSet {
    fn drop(&mut self) {
        unsafe {
            let _ = SetupDiDestroyDeviceInfoList(self.0);
        };
    }
}

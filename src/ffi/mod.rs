//! C ABI over [`AccountManager`] for the native mobile front ends.
//!
//! Functions returning `c_int` use [`FfiStatus`] codes. On failure the
//! message is kept per thread and can be fetched with
//! [`merchant_last_error`]. Strings handed out by this module must be
//! released with [`merchant_string_free`]. A handle is not thread-safe;
//! callers serialize access to it.

use std::{
    cell::RefCell,
    ffi::{CStr, CString},
    os::raw::{c_char, c_double, c_int},
    path::PathBuf,
    ptr,
    sync::OnceLock,
};

use crate::{
    config::Config,
    core::{services::WEEK_DAYS, AccountManager},
    errors::MerchantError,
};

/// Semantic version of the Rust core (mirrors `Cargo.toml`).
pub const CORE_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Semantic version of the FFI surface. Bumps when ABI/contract changes.
pub const FFI_VERSION: &str = "0.1.0";

#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiStatus {
    Ok = 0,
    InvalidArgument = 1,
    Persistence = 2,
    InsufficientFunds = 3,
    Internal = 4,
}

impl From<FfiStatus> for c_int {
    fn from(value: FfiStatus) -> Self {
        value as c_int
    }
}

/// Profile fields addressable through [`merchant_profile_update`].
#[repr(i32)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiProfileField {
    Name = 0,
    PhoneNumber = 1,
    BusinessName = 2,
    Email = 3,
}

impl FfiProfileField {
    fn from_code(code: c_int) -> Option<Self> {
        match code {
            0 => Some(Self::Name),
            1 => Some(Self::PhoneNumber),
            2 => Some(Self::BusinessName),
            3 => Some(Self::Email),
            _ => None,
        }
    }
}

/// Opaque pointer used by external callers to hold manager state.
pub struct MerchantHandle {
    inner: AccountManager,
}

impl MerchantHandle {
    fn new(manager: AccountManager) -> *mut Self {
        Box::into_raw(Box::new(Self { inner: manager }))
    }
}

/// Dashboard snapshot. `weekly_revenue[6]` is today.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default)]
pub struct FfiDashboardSummary {
    pub today_revenue: c_double,
    pub today_transactions: c_int,
    pub active_customers: c_int,
    pub total_balance: c_double,
    pub available_balance: c_double,
    pub weekly_revenue: [c_double; WEEK_DAYS],
}

thread_local! {
    static LAST_ERROR: RefCell<Option<String>> = const { RefCell::new(None) };
}

fn set_last_error(message: impl Into<String>) {
    let message = message.into();
    tracing::debug!(%message, "ffi call failed");
    LAST_ERROR.with(|slot| *slot.borrow_mut() = Some(message));
}

fn clear_last_error() {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = None);
}

fn fail(status: FfiStatus, message: impl Into<String>) -> c_int {
    set_last_error(message);
    status.into()
}

fn fail_with(err: &MerchantError) -> c_int {
    fail(classify_error(err), err.to_string())
}

/// Maps core errors onto status codes.
pub fn classify_error(err: &MerchantError) -> FfiStatus {
    match err {
        MerchantError::InvalidAmount(_) | MerchantError::Config(_) => FfiStatus::InvalidArgument,
        MerchantError::InsufficientFunds { .. } => FfiStatus::InsufficientFunds,
        MerchantError::Io(_) | MerchantError::Serde(_) | MerchantError::Storage(_) => {
            FfiStatus::Persistence
        }
    }
}

/// Returns the core (Rust) semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_core_version() -> *const c_char {
    static CORE: OnceLock<CString> = OnceLock::new();
    CORE.get_or_init(|| CString::new(CORE_VERSION).expect("static core version"))
        .as_ptr()
}

/// Returns the FFI interface semantic version as a C string.
#[no_mangle]
pub extern "C" fn ffi_version() -> *const c_char {
    static FFI: OnceLock<CString> = OnceLock::new();
    FFI.get_or_init(|| CString::new(FFI_VERSION).expect("static ffi version"))
        .as_ptr()
}

/// Opens the store in `data_dir`. When `seed_sample_data` is non-zero an
/// empty ledger receives the demo transactions. Returns null on failure.
#[no_mangle]
pub extern "C" fn merchant_manager_open(
    data_dir: *const c_char,
    seed_sample_data: c_int,
) -> *mut MerchantHandle {
    clear_last_error();
    let dir = match unsafe { c_string_argument(data_dir) } {
        Ok(value) => value,
        Err(message) => {
            set_last_error(message);
            return ptr::null_mut();
        }
    };
    let config = Config {
        data_dir: Some(PathBuf::from(dir)),
        seed_sample_data: seed_sample_data != 0,
        ..Config::default()
    };
    match AccountManager::open(&config) {
        Ok(manager) => MerchantHandle::new(manager),
        Err(err) => {
            set_last_error(err.to_string());
            ptr::null_mut()
        }
    }
}

#[no_mangle]
pub extern "C" fn merchant_manager_free(handle: *mut MerchantHandle) {
    if handle.is_null() {
        return;
    }
    unsafe {
        drop(Box::from_raw(handle));
    }
}

#[no_mangle]
pub extern "C" fn merchant_profile_update(
    handle: *mut MerchantHandle,
    field: c_int,
    value: *const c_char,
) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_mut(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    let Some(field) = FfiProfileField::from_code(field) else {
        return fail(
            FfiStatus::InvalidArgument,
            format!("unknown profile field {field}"),
        );
    };
    let value = match unsafe { c_string_argument(value) } {
        Ok(value) => value,
        Err(message) => return fail(FfiStatus::InvalidArgument, message),
    };
    match field {
        FfiProfileField::Name => manager.update_name(value),
        FfiProfileField::PhoneNumber => manager.update_phone(value),
        FfiProfileField::BusinessName => manager.update_business_name(value),
        FfiProfileField::Email => manager.update_email(value),
    }
    FfiStatus::Ok.into()
}

/// Applies the name and IC number read from an identity document.
#[no_mangle]
pub extern "C" fn merchant_profile_identify(
    handle: *mut MerchantHandle,
    name: *const c_char,
    ic_number: *const c_char,
) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_mut(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    let (name, ic_number) = match unsafe { (c_string_argument(name), c_string_argument(ic_number)) } {
        (Ok(name), Ok(ic_number)) => (name, ic_number),
        (Err(message), _) | (_, Err(message)) => return fail(FfiStatus::InvalidArgument, message),
    };
    manager.update_from_identity(name, ic_number);
    FfiStatus::Ok.into()
}

/// Writes the profile as a JSON object into `out_json`.
#[no_mangle]
pub extern "C" fn merchant_profile_json(
    handle: *const MerchantHandle,
    out_json: *mut *mut c_char,
) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_ref(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    match serde_json::to_string(manager.profile()) {
        Ok(json) => unsafe { write_string(out_json, json) },
        Err(err) => fail_with(&MerchantError::from(err)),
    }
}

/// Sets the session flag: non-zero signs in, zero signs out.
#[no_mangle]
pub extern "C" fn merchant_set_signed_in(handle: *mut MerchantHandle, signed_in: c_int) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_mut(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    if signed_in != 0 {
        manager.sign_in();
    } else {
        manager.sign_out();
    }
    FfiStatus::Ok.into()
}

/// Returns 1 when signed in, 0 when signed out or the handle is null.
#[no_mangle]
pub extern "C" fn merchant_is_signed_in(handle: *const MerchantHandle) -> c_int {
    match unsafe { manager_ref(handle) } {
        Some(manager) => c_int::from(manager.is_signed_in()),
        None => 0,
    }
}

/// Records a completed payment. The new transaction id is written to
/// `out_id` when it is non-null.
#[no_mangle]
pub extern "C" fn merchant_add_transaction(
    handle: *mut MerchantHandle,
    customer_name: *const c_char,
    amount: c_double,
    out_id: *mut *mut c_char,
) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_mut(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    if !amount.is_finite() {
        return fail_with(&MerchantError::InvalidAmount(amount));
    }
    let customer = match unsafe { c_string_argument(customer_name) } {
        Ok(value) => value,
        Err(message) => return fail(FfiStatus::InvalidArgument, message),
    };
    let txn = manager.add_transaction(customer, amount);
    if out_id.is_null() {
        return FfiStatus::Ok.into();
    }
    unsafe { write_string(out_id, txn.id) }
}

#[no_mangle]
pub extern "C" fn merchant_process_withdrawal(handle: *mut MerchantHandle, amount: c_double) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_mut(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    match manager.process_withdrawal(amount) {
        Ok(_) => FfiStatus::Ok.into(),
        Err(err) => fail_with(&err),
    }
}

#[no_mangle]
pub extern "C" fn merchant_get_summary(
    handle: *const MerchantHandle,
    out_summary: *mut FfiDashboardSummary,
) -> c_int {
    clear_last_error();
    if out_summary.is_null() {
        return fail(FfiStatus::InvalidArgument, "output summary is null");
    }
    let Some(manager) = (unsafe { manager_ref(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };

    let summary = manager.dashboard();
    unsafe {
        *out_summary = FfiDashboardSummary {
            today_revenue: summary.today_revenue,
            today_transactions: count_to_c(summary.today_transactions),
            active_customers: count_to_c(summary.active_customers),
            total_balance: summary.total_balance,
            available_balance: summary.available_balance,
            weekly_revenue: summary.weekly_revenue,
        };
    }
    FfiStatus::Ok.into()
}

/// Writes the ledger, most recent first, as a JSON array into `out_json`.
#[no_mangle]
pub extern "C" fn merchant_transactions_json(
    handle: *const MerchantHandle,
    out_json: *mut *mut c_char,
) -> c_int {
    clear_last_error();
    let Some(manager) = (unsafe { manager_ref(handle) }) else {
        return fail(FfiStatus::InvalidArgument, "manager handle is null");
    };
    match serde_json::to_string(manager.transactions()) {
        Ok(json) => unsafe { write_string(out_json, json) },
        Err(err) => fail_with(&MerchantError::from(err)),
    }
}

/// Returns a copy of this thread's last error message, or null when the
/// previous call succeeded. Free it with [`merchant_string_free`].
#[no_mangle]
pub extern "C" fn merchant_last_error() -> *mut c_char {
    LAST_ERROR.with(|slot| {
        slot.borrow()
            .as_deref()
            .and_then(|message| CString::new(message).ok())
            .map_or(ptr::null_mut(), CString::into_raw)
    })
}

#[no_mangle]
pub extern "C" fn merchant_string_free(value: *mut c_char) {
    if value.is_null() {
        return;
    }
    unsafe {
        drop(CString::from_raw(value));
    }
}

fn count_to_c(count: usize) -> c_int {
    c_int::try_from(count).unwrap_or(c_int::MAX)
}

unsafe fn manager_mut<'a>(handle: *mut MerchantHandle) -> Option<&'a mut AccountManager> {
    handle.as_mut().map(|handle| &mut handle.inner)
}

unsafe fn manager_ref<'a>(handle: *const MerchantHandle) -> Option<&'a AccountManager> {
    handle.as_ref().map(|handle| &handle.inner)
}

unsafe fn write_string(target: *mut *mut c_char, value: String) -> c_int {
    if target.is_null() {
        return fail(FfiStatus::InvalidArgument, "output pointer is null");
    }
    match CString::new(value) {
        Ok(cstring) => {
            *target = cstring.into_raw();
            FfiStatus::Ok.into()
        }
        Err(err) => fail(FfiStatus::Internal, err.to_string()),
    }
}

unsafe fn c_string_argument(ptr: *const c_char) -> Result<String, String> {
    if ptr.is_null() {
        return Err("null string pointer received".into());
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map(str::to_string)
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn c(value: &str) -> CString {
        CString::new(value).unwrap()
    }

    fn take_string(ptr: *mut c_char) -> String {
        assert!(!ptr.is_null());
        let value = unsafe { CStr::from_ptr(ptr) }.to_str().unwrap().to_string();
        merchant_string_free(ptr);
        value
    }

    fn open(dir: &std::path::Path, seed: bool) -> *mut MerchantHandle {
        let path = c(dir.to_str().unwrap());
        let handle = merchant_manager_open(path.as_ptr(), c_int::from(seed));
        assert!(!handle.is_null());
        handle
    }

    #[test]
    fn exposes_versions() {
        assert!(!ffi_core_version().is_null());
        assert!(!ffi_version().is_null());
    }

    #[test]
    fn open_with_seed_reports_demo_balance() {
        let dir = tempdir().unwrap();
        let handle = open(dir.path(), true);

        let mut summary = FfiDashboardSummary::default();
        assert_eq!(merchant_get_summary(handle, &mut summary), 0);
        assert!((summary.total_balance - 498.24).abs() < 1e-9);
        assert_eq!(summary.total_balance, summary.available_balance);
        merchant_manager_free(handle);
    }

    #[test]
    fn payments_and_withdrawals_round_trip_through_the_handle() {
        let dir = tempdir().unwrap();
        let handle = open(dir.path(), false);
        assert_eq!(merchant_set_signed_in(handle, 1), 0);
        assert_eq!(merchant_is_signed_in(handle), 1);

        let name = c("Sarah Johnson");
        let mut id: *mut c_char = ptr::null_mut();
        assert_eq!(merchant_add_transaction(handle, name.as_ptr(), 128.5, &mut id), 0);
        let id = take_string(id);

        assert_eq!(merchant_process_withdrawal(handle, 28.5), 0);
        assert_eq!(
            merchant_process_withdrawal(handle, 100.01),
            c_int::from(FfiStatus::InsufficientFunds)
        );
        let message = take_string(merchant_last_error());
        assert!(message.contains("Insufficient funds"));

        let mut json: *mut c_char = ptr::null_mut();
        assert_eq!(merchant_transactions_json(handle, &mut json), 0);
        let json = take_string(json);
        assert!(json.contains(&id));
        assert!(json.contains("\"customerName\":\"Sarah Johnson\""));

        let mut summary = FfiDashboardSummary::default();
        merchant_get_summary(handle, &mut summary);
        assert_eq!(summary.available_balance, 100.0);
        assert_eq!(summary.today_transactions, 1);
        merchant_manager_free(handle);
    }

    #[test]
    fn profile_updates_persist_across_handles() {
        let dir = tempdir().unwrap();
        let handle = open(dir.path(), false);
        let email = c("owner@kopi.my");
        let name = c("Lai Jien Weng");
        let ic = c("900101-14-5678");
        assert_eq!(
            merchant_profile_update(handle, FfiProfileField::Email as c_int, email.as_ptr()),
            0
        );
        assert_eq!(merchant_profile_identify(handle, name.as_ptr(), ic.as_ptr()), 0);
        merchant_manager_free(handle);

        let handle = open(dir.path(), false);
        let mut json: *mut c_char = ptr::null_mut();
        assert_eq!(merchant_profile_json(handle, &mut json), 0);
        let json = take_string(json);
        assert!(json.contains("\"email\":\"owner@kopi.my\""));
        assert!(json.contains("\"icNumber\":\"900101-14-5678\""));
        assert_eq!(merchant_is_signed_in(handle), 0);
        merchant_manager_free(handle);
    }

    #[test]
    fn null_arguments_set_last_error() {
        assert_eq!(
            merchant_process_withdrawal(ptr::null_mut(), 1.0),
            c_int::from(FfiStatus::InvalidArgument)
        );
        assert_eq!(take_string(merchant_last_error()), "manager handle is null");
        assert!(merchant_manager_open(ptr::null(), 0).is_null());

        let dir = tempdir().unwrap();
        let handle = open(dir.path(), false);
        assert!(merchant_last_error().is_null());
        assert_eq!(
            merchant_profile_update(handle, 42, c("x").as_ptr()),
            c_int::from(FfiStatus::InvalidArgument)
        );
        merchant_manager_free(handle);
    }
}

use crate::domain_types::{DegradationLevel, DegradationReason};

/// 連線狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Connectivity {
    Online,
    Offline,
}

impl Connectivity {
    pub fn from_online(online: bool) -> Self {
        if online {
            Connectivity::Online
        } else {
            Connectivity::Offline
        }
    }

    pub fn is_online(self) -> bool {
        self == Connectivity::Online
    }
}

/// 重試進度比例
///
/// `max_retries` 為 0 時：尚未重試視為 0，否則視為已耗盡。
pub fn retry_ratio(retry_count: u32, max_retries: u32) -> f64 {
    if max_retries == 0 {
        return if retry_count == 0 { 0.0 } else { 1.0 };
    }
    f64::from(retry_count) / f64::from(max_retries)
}

/// 依原因、重試進度與連線狀態計算降級等級
pub fn resolve_level(
    reason: DegradationReason,
    retry_count: u32,
    max_retries: u32,
    connectivity: Connectivity,
) -> DegradationLevel {
    let ratio = retry_ratio(retry_count, max_retries);

    match reason {
        DegradationReason::MemoryPressure => DegradationLevel::Critical,
        DegradationReason::ServiceDisruption => DegradationLevel::Severe,
        DegradationReason::MalformedContent => {
            if ratio > 0.5 {
                DegradationLevel::Moderate
            } else {
                DegradationLevel::Minor
            }
        }
        DegradationReason::NetworkFailure => {
            if connectivity.is_online() {
                DegradationLevel::Minor
            } else {
                DegradationLevel::Moderate
            }
        }
        _ => {
            if ratio > 0.7 {
                DegradationLevel::Severe
            } else {
                DegradationLevel::Moderate
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_memory_pressure_always_critical() {
        for retry_count in 0..6 {
            for max_retries in 0..6 {
                for connectivity in [Connectivity::Online, Connectivity::Offline] {
                    assert_eq!(
                        resolve_level(
                            DegradationReason::MemoryPressure,
                            retry_count,
                            max_retries,
                            connectivity
                        ),
                        DegradationLevel::Critical
                    );
                }
            }
        }
    }

    #[test]
    fn test_service_disruption_always_severe() {
        assert_eq!(
            resolve_level(DegradationReason::ServiceDisruption, 0, 3, Connectivity::Online),
            DegradationLevel::Severe
        );
        assert_eq!(
            resolve_level(DegradationReason::ServiceDisruption, 3, 3, Connectivity::Offline),
            DegradationLevel::Severe
        );
    }

    #[rstest]
    #[case(0, 3, DegradationLevel::Minor)]
    #[case(1, 2, DegradationLevel::Minor)]
    #[case(2, 3, DegradationLevel::Moderate)]
    #[case(1, 0, DegradationLevel::Moderate)]
    fn test_malformed_content_by_ratio(
        #[case] retry_count: u32,
        #[case] max_retries: u32,
        #[case] expected: DegradationLevel,
    ) {
        assert_eq!(
            resolve_level(
                DegradationReason::MalformedContent,
                retry_count,
                max_retries,
                Connectivity::Online
            ),
            expected
        );
    }

    #[test]
    fn test_network_failure_depends_on_connectivity() {
        assert_eq!(
            resolve_level(DegradationReason::NetworkFailure, 3, 3, Connectivity::Online),
            DegradationLevel::Minor
        );
        assert_eq!(
            resolve_level(DegradationReason::NetworkFailure, 0, 3, Connectivity::Offline),
            DegradationLevel::Moderate
        );
    }

    #[rstest]
    #[case(DegradationReason::TimeoutError, 3, 3, DegradationLevel::Severe)]
    #[case(DegradationReason::TimeoutError, 2, 3, DegradationLevel::Moderate)]
    #[case(DegradationReason::ValidationError, 0, 3, DegradationLevel::Moderate)]
    #[case(DegradationReason::RenderingError, 4, 5, DegradationLevel::Severe)]
    #[case(DegradationReason::DataCorruption, 0, 0, DegradationLevel::Moderate)]
    fn test_other_reasons_by_ratio(
        #[case] reason: DegradationReason,
        #[case] retry_count: u32,
        #[case] max_retries: u32,
        #[case] expected: DegradationLevel,
    ) {
        assert_eq!(
            resolve_level(reason, retry_count, max_retries, Connectivity::Online),
            expected
        );
    }
}

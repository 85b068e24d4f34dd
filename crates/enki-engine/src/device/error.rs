use wgpu::SurfaceError;

/// What the frame loop should do after acquisition failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceErrorAction {
    /// The swapchain was stale and has been rebuilt; try again next frame.
    Reconfigured,
    /// Transient failure; drop this frame and carry on.
    SkipFrame,
    /// The device cannot continue. Shut the loop down.
    Fatal,
}

impl SurfaceErrorAction {
    /// Pure classification of a [`SurfaceError`]. Reconfiguring the
    /// surface, when called for, is [`Gpu`](super::Gpu)'s job.
    pub fn for_error(err: &SurfaceError) -> Self {
        match err {
            SurfaceError::Lost | SurfaceError::Outdated => SurfaceErrorAction::Reconfigured,
            SurfaceError::OutOfMemory => SurfaceErrorAction::Fatal,
            SurfaceError::Timeout | SurfaceError::Other => SurfaceErrorAction::SkipFrame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_swapchain_errors_reconfigure() {
        assert_eq!(
            SurfaceErrorAction::for_error(&SurfaceError::Lost),
            SurfaceErrorAction::Reconfigured
        );
        assert_eq!(
            SurfaceErrorAction::for_error(&SurfaceError::Outdated),
            SurfaceErrorAction::Reconfigured
        );
    }

    #[test]
    fn oom_is_fatal() {
        assert_eq!(
            SurfaceErrorAction::for_error(&SurfaceError::OutOfMemory),
            SurfaceErrorAction::Fatal
        );
    }

    #[test]
    fn transient_errors_skip_the_frame() {
        assert_eq!(
            SurfaceErrorAction::for_error(&SurfaceError::Timeout),
            SurfaceErrorAction::SkipFrame
        );
    }
}

//! This file defines the template for the navigation bar shown on pages
//! behind the log in.

use maud::{Markup, html};

use crate::endpoints;

pub struct NavBar;

impl NavBar {
    pub fn into_html(self) -> Markup {
        // Template adapted from https://flowbite.com/docs/components/navbar/#default-navbar
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900"
            {
                div
                    class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a
                        href=(endpoints::DASHBOARD_VIEW)
                        class="flex items-center space-x-3 rtl:space-x-reverse"
                    {
                        span
                            class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            "Cofrinho"
                        }
                    }

                    a
                        href=(endpoints::LOG_OUT)
                        class="block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
                            lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
                            dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
                            dark:hover:text-white lg:dark:hover:bg-transparent"
                    {
                        "Log out"
                    }
                }
            }
        )
    }
}
